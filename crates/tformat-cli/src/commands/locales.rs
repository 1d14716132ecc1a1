//! Implementation of the `tformat locales` command.

use std::collections::BTreeMap;

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tformat::{LoadReport, LoadWarning, LocaleId};

use crate::commands::BundleArgs;
use crate::output::table::{LocaleRow, format_locales_table};

/// Arguments for the locales command.
#[derive(Debug, Args)]
pub struct LocalesArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for a bundle listing.
#[derive(Debug, Serialize)]
struct LocalesJson {
    default_locale: String,
    locales: Vec<LocaleJson>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LocaleJson {
    locale: String,
    keys: usize,
    skipped: usize,
}

/// Collect one row per loaded locale.
fn locale_rows(report: &LoadReport) -> Vec<LocaleRow> {
    let mut skipped = BTreeMap::<LocaleId, usize>::new();
    for warning in &report.warnings {
        let LoadWarning::SkippedPattern { locale, .. } = warning;
        *skipped.entry(*locale).or_default() += 1;
    }

    report
        .key_counts
        .iter()
        .map(|(locale, keys)| LocaleRow {
            locale: locale.to_string(),
            keys: *keys,
            skipped: skipped.get(locale).copied().unwrap_or_default(),
        })
        .collect()
}

/// Run the locales command.
pub fn run_locales(args: LocalesArgs) -> Result<i32> {
    let (_manager, report) = args.bundle.load()?;
    let rows = locale_rows(&report);
    let default_locale = args.bundle.default_locale.to_string();

    if args.json {
        let output = LocalesJson {
            default_locale,
            locales: rows
                .into_iter()
                .map(|row| LocaleJson {
                    locale: row.locale,
                    keys: row.keys,
                    skipped: row.skipped,
                })
                .collect(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", format_locales_table(&rows, &default_locale));

        if !report.warnings.is_empty() {
            println!(
                "\n{}",
                "Skipped patterns:".if_supports_color(Stream::Stdout, |text| text.yellow())
            );
            for warning in &report.warnings {
                println!("  - {warning}");
            }
        }
    }

    Ok(exitcode::OK)
}
