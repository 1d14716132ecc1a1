use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::manager::LoadError;
use crate::types::{LocaleId, LocaleIdError};

/// One locale listed in a bundle's `language.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Properties file name, relative to the bundle directory.
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ManifestEntry {
    pub fn locale(&self) -> Result<LocaleId, LocaleIdError> {
        LocaleId::new(&self.language, self.country.as_deref())
    }
}

/// The list of locales in a translation bundle.
///
/// # Example
///
/// ```
/// use tformat::loader::Manifest;
///
/// let manifest = Manifest::from_json(r#"[
///     { "language": "de", "country": "DE", "file": "de_DE.properties", "version": "3" },
///     { "language": "en", "file": "en.properties" }
/// ]"#).unwrap();
///
/// assert_eq!(manifest.entries.len(), 2);
/// assert_eq!(manifest.entries[1].country, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Name of the manifest file inside a bundle directory.
    pub const FILE_NAME: &'static str = "language.json";

    pub fn from_json(text: &str) -> Result<Manifest, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read `language.json` from `dir`.
    pub fn read(dir: &Path) -> Result<Manifest, LoadError> {
        let path = dir.join(Manifest::FILE_NAME);
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Manifest::from_json(&text).map_err(|e| LoadError::Manifest {
            path,
            message: e.to_string(),
        })
    }
}
