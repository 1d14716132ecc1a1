//! Reading translation bundles from disk.
//!
//! A bundle is a directory with a `language.json` manifest and one
//! `.properties` file per locale:
//!
//! ```text
//! lang/
//!   language.json      [{ "language": "de", "country": "DE", "file": "de_DE.properties" }]
//!   de_DE.properties   greeting = Hallo {0}!
//! ```

mod manifest;
mod properties;

pub use manifest::{Manifest, ManifestEntry};
pub use properties::{PropertiesError, parse_properties};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::manager::{LoadError, RawTranslations};

/// Read every locale listed in `dir/language.json`.
///
/// Patterns are returned uncompiled; a locale listed twice has its entries
/// merged, later files winning on duplicate keys.
pub fn load_bundle(dir: impl AsRef<Path>) -> Result<RawTranslations, LoadError> {
    let dir = dir.as_ref();
    let manifest = Manifest::read(dir)?;
    let mut raw = RawTranslations::new();

    for entry in &manifest.entries {
        let locale = entry.locale().map_err(|e| LoadError::Manifest {
            path: dir.join(Manifest::FILE_NAME),
            message: e.to_string(),
        })?;
        let path = dir.join(&entry.file);
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let entries = parse_properties(&text).map_err(|source| LoadError::Properties {
            path: path.clone(),
            source,
        })?;

        debug!(target: "tformat::load", %locale, path = %path.display(), keys = entries.len(), "read translation file");
        raw.entry(locale).or_default().extend(entries);
    }

    Ok(raw)
}
