//! Locale resolution chain.
//!
//! A [`LocaleManager`] owns one translation table and optionally a parent.
//! A lookup first tries the requested locale, then the configured default
//! locale, then hands the whole call to the parent manager.

mod config;
mod error;
mod table;

pub use config::{LoadMode, ManagerConfig};
pub use error::{ChainError, LoadError, LoadWarning, TranslateError};
pub use table::{LoadReport, LocaleTable, RawTranslations};

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use strsim::levenshtein;
use tracing::{debug, info, warn};

use crate::loader;
use crate::types::{LocaleId, Value};

/// Resolves translation keys to formatted messages.
///
/// Managers are `Send + Sync` and meant to be shared behind an `Arc`. The
/// table can be replaced at any time with [`load`](Self::load); concurrent
/// readers see either the old or the new table, never a mix.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use tformat::{LocaleId, LocaleManager, ManagerConfig, RawTranslations, args};
///
/// let mut raw = RawTranslations::new();
/// raw.insert(
///     LocaleId::GERMANY,
///     BTreeMap::from([("greeting".to_string(), "Hallo {0}!".to_string())]),
/// );
///
/// let manager = LocaleManager::new(ManagerConfig::default());
/// manager.load(&raw).unwrap();
///
/// let french: LocaleId = "fr-FR".parse().unwrap();
/// assert_eq!(manager.translate(&french, "greeting", &args!["Ana"]), "Hallo Ana!");
/// assert_eq!(manager.translate(&french, "missing", &args![]), "missing");
/// ```
#[derive(Debug)]
pub struct LocaleManager {
    kind: ManagerKind,
    config: ManagerConfig,
    table: RwLock<Arc<LocaleTable>>,
    parent: Option<Arc<LocaleManager>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerKind {
    Table,
    /// Answers every lookup with the key itself.
    Identity,
}

/// Strict view of a manager: failures are returned instead of replaced by
/// the key.
#[derive(Debug, Clone, Copy)]
pub struct Strict<'a> {
    manager: &'a LocaleManager,
}

impl Strict<'_> {
    pub fn translate(&self, locale: &LocaleId, key: &str, args: &[Value]) -> Result<String, TranslateError> {
        self.manager.try_translate(locale, key, args)
    }
}

impl LocaleManager {
    /// Create a manager with an empty table and no parent.
    pub fn new(config: ManagerConfig) -> Self {
        LocaleManager {
            kind: ManagerKind::Table,
            config,
            table: RwLock::new(Arc::new(LocaleTable::default())),
            parent: None,
        }
    }

    /// Create a manager that delegates unresolved keys to `parent`.
    ///
    /// Fails if the resulting chain, counting this manager, would be longer
    /// than `config.max_chain_depth()`. Parents are immutable once shared,
    /// so a chain built this way can never loop back on itself.
    pub fn with_parent(config: ManagerConfig, parent: Arc<LocaleManager>) -> Result<Self, ChainError> {
        let depth = parent.chain_depth() + 1;
        let max = config.max_chain_depth();
        if depth > max {
            return Err(ChainError::TooDeep { depth, max });
        }
        Ok(LocaleManager {
            parent: Some(parent),
            ..LocaleManager::new(config)
        })
    }

    /// A manager that returns every key unchanged.
    ///
    /// Useful as the last link of a chain, where a missing key should show up
    /// as itself rather than as an error.
    pub fn identity() -> Self {
        LocaleManager {
            kind: ManagerKind::Identity,
            ..LocaleManager::new(ManagerConfig::default())
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn parent(&self) -> Option<&Arc<LocaleManager>> {
        self.parent.as_ref()
    }

    pub fn is_identity(&self) -> bool {
        self.kind == ManagerKind::Identity
    }

    /// Number of managers in the chain starting at this one.
    pub fn chain_depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(parent) = &current.parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Compile `raw` and publish it as this manager's table.
    ///
    /// The new table is built completely before it replaces the old one. In
    /// strict mode a bad pattern fails the load and the old table stays.
    pub fn load(&self, raw: &RawTranslations) -> Result<LoadReport, LoadError> {
        let (table, warnings) = LocaleTable::compile(raw, self.config.load_mode())?;
        let report = LoadReport {
            key_counts: table.key_counts(),
            warnings,
        };
        *self.table.write() = Arc::new(table);
        debug!(target: "tformat::load", locales = %report.summary(), "published translation table");
        Ok(report)
    }

    /// Read a bundle directory and publish it.
    ///
    /// See [`loader::load_bundle`] for the expected layout.
    pub fn load_bundle(&self, dir: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let dir = dir.as_ref();
        let raw = loader::load_bundle(dir)?;
        let report = self.load(&raw)?;
        info!(
            target: "tformat::load",
            "loaded locales from {}: {}",
            dir.display(),
            report.summary()
        );
        Ok(report)
    }

    /// The table currently published.
    pub fn snapshot(&self) -> Arc<LocaleTable> {
        Arc::clone(&self.table.read())
    }

    /// Locales present in this manager's own table.
    pub fn loaded_locales(&self) -> BTreeSet<LocaleId> {
        self.snapshot().locales()
    }

    /// Whether this manager's own table resolves `key` for `locale`,
    /// including the fallback to the default locale.
    pub fn has_translation(&self, locale: &LocaleId, key: &str) -> bool {
        self.snapshot()
            .find(locale, key, &self.config.default_locale(), self.config.accepted_locales())
            .is_some()
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate `key` for `locale`.
    ///
    /// Never fails: a missing key or a formatting error is logged and the key
    /// itself is returned. Use [`strict`](Self::strict) to get the error.
    pub fn translate(&self, locale: &LocaleId, key: &str, args: &[Value]) -> String {
        match self.try_translate(locale, key, args) {
            Ok(text) => text,
            Err(error @ TranslateError::MissingTranslation { .. }) => {
                debug!(target: "tformat::translate", %error, "falling back to key");
                key.to_string()
            }
            Err(error @ TranslateError::Format { .. }) => {
                warn!(target: "tformat::translate", %error, "falling back to key");
                key.to_string()
            }
        }
    }

    /// A view of this manager whose `translate` returns errors.
    pub fn strict(&self) -> Strict<'_> {
        Strict { manager: self }
    }

    fn try_translate(&self, locale: &LocaleId, key: &str, args: &[Value]) -> Result<String, TranslateError> {
        let mut manager = self;
        loop {
            if manager.is_identity() {
                return Ok(key.to_string());
            }

            let table = manager.snapshot();
            let default = manager.config.default_locale();
            if let Some((found, pattern)) = table.find(locale, key, &default, manager.config.accepted_locales()) {
                if found != *locale {
                    debug!(target: "tformat::translate", %key, requested = %locale, %found, "using fallback locale");
                }
                let args = manager.resolve_substitutions(locale, args);
                return pattern
                    .format(Some(&*args))
                    .map_err(|source| TranslateError::Format {
                        key: key.to_string(),
                        locale: found,
                        source,
                    });
            }

            match &manager.parent {
                Some(parent) => manager = parent,
                None => {
                    let searched = if table.contains_locale(locale) { *locale } else { default };
                    return Err(TranslateError::MissingTranslation {
                        key: key.to_string(),
                        locale: *locale,
                        suggestions: compute_suggestions(key, table.keys(&searched)),
                    });
                }
            }
        }
    }

    /// Replace every substitution in `args`, including inside sequences,
    /// with the value it resolves to against this manager.
    fn resolve_substitutions<'v>(&self, locale: &LocaleId, args: &'v [Value]) -> Cow<'v, [Value]> {
        if !args.iter().any(Value::needs_resolution) {
            return Cow::Borrowed(args);
        }
        Cow::Owned(args.iter().map(|value| self.resolve_value(locale, value)).collect())
    }

    fn resolve_value(&self, locale: &LocaleId, value: &Value) -> Value {
        match value {
            Value::Substitution(substitution) => substitution.resolve(locale, self),
            Value::Sequence(items) => Value::Sequence(
                items
                    .iter()
                    .map(|item| self.resolve_value(locale, item))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// Keys of up to 3 characters allow distance 1, longer keys distance 2. At
/// most 3 suggestions are returned, closest first.
pub fn compute_suggestions<'a>(key: &str, available: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let max_distance = if key.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(key, candidate);
            (distance > 0 && distance <= max_distance).then_some((distance, candidate))
        })
        .collect();

    suggestions.sort_by_key(|(distance, _)| *distance);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
