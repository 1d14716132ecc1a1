//! CLI command implementations.

mod eval;
mod locales;

pub use eval::{EvalArgs, run_eval};
pub use locales::{LocalesArgs, run_locales};

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use tformat::{LoadMode, LoadReport, LocaleId, LocaleManager, ManagerConfig};
use tracing::debug;

/// Options shared by every command that reads a bundle.
#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Bundle directory containing language.json
    #[arg(long)]
    pub bundle: PathBuf,

    /// Locale used when the requested one lacks a key
    #[arg(long, env = "TFORMAT_DEFAULT_LOCALE", default_value = "de-DE")]
    pub default_locale: LocaleId,

    /// Fail on the first malformed pattern instead of skipping it
    #[arg(long)]
    pub strict_load: bool,
}

impl BundleArgs {
    fn config(&self) -> ManagerConfig {
        let load_mode = if self.strict_load { LoadMode::Strict } else { LoadMode::Lenient };
        ManagerConfig::builder()
            .default_locale(self.default_locale)
            .load_mode(load_mode)
            .build()
    }

    /// Build a manager and load the bundle into it.
    pub fn load(&self) -> Result<(LocaleManager, LoadReport)> {
        let manager = LocaleManager::new(self.config());
        debug!(target: "tformat::cli", bundle = %self.bundle.display(), default = %self.default_locale, "loading bundle");
        let report = manager
            .load_bundle(&self.bundle)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to load bundle {}", self.bundle.display()))?;
        Ok((manager, report))
    }
}
