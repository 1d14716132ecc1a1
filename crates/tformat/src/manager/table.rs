use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::format::CompiledPattern;
use crate::manager::config::LoadMode;
use crate::manager::error::{LoadError, LoadWarning};
use crate::types::LocaleId;

/// Raw pattern text per locale and key, as read from a bundle.
pub type RawTranslations = BTreeMap<LocaleId, BTreeMap<String, String>>;

/// Compiled patterns for every loaded locale.
///
/// A table is immutable once built. Managers publish a whole table at a time,
/// so readers always see a complete one.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    locales: BTreeMap<LocaleId, BTreeMap<String, CompiledPattern>>,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of compiled keys per locale.
    pub key_counts: BTreeMap<LocaleId, usize>,
    /// Entries skipped in lenient mode.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// One line per load for logs: `de-DE (12 keys) | en-US (10 keys)`.
    pub fn summary(&self) -> String {
        self.key_counts
            .iter()
            .map(|(locale, count)| format!("{locale} ({count} keys)"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl LocaleTable {
    /// Compile every pattern in `raw`.
    ///
    /// In lenient mode a pattern that fails to compile is logged, reported as
    /// a warning and left out; in strict mode it aborts the whole build.
    pub fn compile(raw: &RawTranslations, mode: LoadMode) -> Result<(LocaleTable, Vec<LoadWarning>), LoadError> {
        let mut locales = BTreeMap::new();
        let mut warnings = Vec::new();

        for (locale, entries) in raw {
            let mut compiled = BTreeMap::new();
            for (key, pattern) in entries {
                match CompiledPattern::compile(pattern, locale) {
                    Ok(pattern) => {
                        compiled.insert(key.clone(), pattern);
                    }
                    Err(source) if mode == LoadMode::Strict => {
                        return Err(LoadError::Pattern {
                            locale: *locale,
                            key: key.clone(),
                            source,
                        });
                    }
                    Err(source) => {
                        warn!(target: "tformat::load", %locale, %key, error = %source, "skipping malformed pattern");
                        warnings.push(LoadWarning::SkippedPattern {
                            locale: *locale,
                            key: key.clone(),
                            message: source.to_string(),
                        });
                    }
                }
            }
            locales.insert(*locale, compiled);
        }

        Ok((LocaleTable { locales }, warnings))
    }

    /// Look up `key` in exactly `locale`, without fallback.
    pub fn get(&self, locale: &LocaleId, key: &str) -> Option<&CompiledPattern> {
        self.locales.get(locale).and_then(|patterns| patterns.get(key))
    }

    pub fn contains_locale(&self, locale: &LocaleId) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> BTreeSet<LocaleId> {
        self.locales.keys().copied().collect()
    }

    pub fn key_count(&self, locale: &LocaleId) -> usize {
        self.locales.get(locale).map_or(0, BTreeMap::len)
    }

    /// Keys loaded for `locale`, in sorted order.
    pub fn keys(&self, locale: &LocaleId) -> impl Iterator<Item = &str> {
        self.locales
            .get(locale)
            .into_iter()
            .flat_map(|patterns| patterns.keys().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub(crate) fn key_counts(&self) -> BTreeMap<LocaleId, usize> {
        self.locales
            .iter()
            .map(|(locale, patterns)| (*locale, patterns.len()))
            .collect()
    }

    /// Resolve `key` for `locale` with single-hop fallback to `default`.
    ///
    /// A locale that is not accepted is read as `default` outright. Returns
    /// the locale the pattern was found under.
    pub(crate) fn find(
        &self,
        locale: &LocaleId,
        key: &str,
        default: &LocaleId,
        accepted: Option<&BTreeSet<LocaleId>>,
    ) -> Option<(LocaleId, &CompiledPattern)> {
        let is_accepted = match accepted {
            Some(accepted) => accepted.contains(locale),
            None => self.contains_locale(locale),
        };
        let effective = if is_accepted { locale } else { default };

        if let Some(pattern) = self.get(effective, key) {
            return Some((*effective, pattern));
        }
        if effective == default {
            return None;
        }
        self.get(default, key).map(|pattern| (*default, pattern))
    }
}
