use std::collections::BTreeSet;

use bon::Builder;

use crate::types::LocaleId;

/// How a load treats patterns that fail to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Skip the entry, record a warning and keep loading.
    #[default]
    Lenient,
    /// Abort on the first bad entry and keep the previous table.
    Strict,
}

/// Settings for a [`LocaleManager`](crate::LocaleManager).
///
/// # Example
///
/// ```
/// use tformat::{LoadMode, LocaleId, ManagerConfig};
///
/// let config = ManagerConfig::builder()
///     .default_locale(LocaleId::US)
///     .load_mode(LoadMode::Strict)
///     .build();
///
/// assert_eq!(config.default_locale(), LocaleId::US);
/// assert_eq!(config.max_chain_depth(), 16);
/// assert!(config.accepted_locales().is_none());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ManagerConfig {
    /// Locale used when the requested one is not accepted or lacks a key.
    #[builder(default = LocaleId::GERMANY)]
    default_locale: LocaleId,

    /// Locales a lookup may use directly. When unset, every locale present
    /// in the loaded table is accepted.
    accepted_locales: Option<BTreeSet<LocaleId>>,

    #[builder(default)]
    load_mode: LoadMode,

    /// Longest allowed manager chain, counting the manager itself.
    #[builder(default = 16)]
    max_chain_depth: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig::builder().build()
    }
}

impl ManagerConfig {
    pub fn default_locale(&self) -> LocaleId {
        self.default_locale
    }

    pub fn accepted_locales(&self) -> Option<&BTreeSet<LocaleId>> {
        self.accepted_locales.as_ref()
    }

    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    pub fn max_chain_depth(&self) -> usize {
        self.max_chain_depth
    }
}
