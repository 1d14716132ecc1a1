use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use icu_locale_core::subtags::{Language, Region, language, region};
use icu_locale_core::{LanguageIdentifier, Locale};
use thiserror::Error;

/// A locale identity: a language plus an optional country.
///
/// Both parts are normalized when parsed (`de_de`, `de-DE` and `DE-de` are the
/// same locale), so equality is a plain exact match.
///
/// # Example
///
/// ```
/// use tformat::LocaleId;
///
/// let locale: LocaleId = "de_de".parse().unwrap();
/// assert_eq!(locale, LocaleId::GERMANY);
/// assert_eq!(locale.to_string(), "de-DE");
/// assert_eq!(locale.country(), Some("DE"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId {
    language: Language,
    region: Option<Region>,
}

/// A string that could not be read as a locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale '{input}'")]
pub struct LocaleIdError {
    pub input: String,
}

impl LocaleId {
    /// German as spoken in Germany, the stock default locale.
    pub const GERMANY: LocaleId = LocaleId {
        language: language!("de"),
        region: Some(region!("DE")),
    };

    /// English as spoken in the United States.
    pub const US: LocaleId = LocaleId {
        language: language!("en"),
        region: Some(region!("US")),
    };

    /// Build a locale from a language code and an optional country code.
    ///
    /// An empty country is treated as no country.
    pub fn new(language: &str, country: Option<&str>) -> Result<Self, LocaleIdError> {
        let invalid = || LocaleIdError {
            input: match country {
                Some(country) => format!("{language}_{country}"),
                None => language.to_string(),
            },
        };
        let language = language
            .trim()
            .parse::<Language>()
            .map_err(|_| invalid())?;
        let region = match country.map(str::trim) {
            None | Some("") => None,
            Some(country) => Some(country.parse::<Region>().map_err(|_| invalid())?),
        };
        Ok(LocaleId { language, region })
    }

    /// The normalized language code (e.g. `"de"`).
    pub fn language(&self) -> &str {
        self.language.as_str()
    }

    /// The normalized country code (e.g. `"DE"`), if any.
    pub fn country(&self) -> Option<&str> {
        self.region.as_ref().map(Region::as_str)
    }

    /// Convert to an ICU locale for data lookup.
    pub fn to_icu(&self) -> Locale {
        Locale::from(LanguageIdentifier::from((self.language, None, self.region)))
    }
}

impl Display for LocaleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for LocaleId {
    type Err = LocaleIdError;

    /// Parse `"de"`, `"de-DE"` or `"de_DE"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next();
        if parts.next().is_some() {
            return Err(LocaleIdError {
                input: s.to_string(),
            });
        }
        LocaleId::new(language, country).map_err(|_| LocaleIdError {
            input: s.to_string(),
        })
    }
}
