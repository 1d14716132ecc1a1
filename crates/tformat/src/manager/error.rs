//! Error types for translation lookup, loading and manager construction.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::{FormatError, PatternError};
use crate::loader::PropertiesError;
use crate::types::LocaleId;

/// A translation that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The key was not found anywhere along the fallback chain.
    #[error("missing translation '{key}' for {locale}{}", did_you_mean(suggestions))]
    MissingTranslation {
        key: String,
        locale: LocaleId,
        suggestions: Vec<String>,
    },

    /// The pattern was found but could not format the arguments.
    #[error("failed to format '{key}' for {locale}: {source}")]
    Format {
        key: String,
        locale: LocaleId,
        #[source]
        source: FormatError,
    },
}

impl TranslateError {
    pub fn key(&self) -> &str {
        match self {
            TranslateError::MissingTranslation { key, .. } | TranslateError::Format { key, .. } => key,
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Errors that abort a load. The previously published table stays in place.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A pattern failed to compile while loading in strict mode.
    #[error("invalid pattern for '{key}' in {locale}: {source}")]
    Pattern {
        locale: LocaleId,
        key: String,
        #[source]
        source: PatternError,
    },

    /// File I/O error when reading a manifest or translation file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundle manifest is malformed.
    #[error("invalid manifest '{path}': {message}")]
    Manifest { path: PathBuf, message: String },

    /// A translation file is not valid properties syntax.
    #[error("{path}:{source}")]
    Properties {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
}

/// A manager chain that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("manager chain depth {depth} exceeds the limit of {max}")]
    TooDeep { depth: usize, max: usize },
}

/// A non-fatal problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A pattern failed to compile and its key was left out of the table.
    SkippedPattern {
        locale: LocaleId,
        key: String,
        message: String,
    },
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LoadWarning::SkippedPattern {
                locale,
                key,
                message,
            } => write!(f, "skipped '{key}' in {locale}: {message}"),
        }
    }
}
