//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Load results for a single locale.
pub struct LocaleRow {
    /// Locale tag (e.g., "de-DE").
    pub locale: String,
    /// Number of patterns that compiled.
    pub keys: usize,
    /// Number of patterns skipped as malformed.
    pub skipped: usize,
}

/// Format per-locale load results as an ASCII table.
pub fn format_locales_table(rows: &[LocaleRow], default_locale: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Keys", "Skipped"]);

    for row in rows {
        let locale = if row.locale == default_locale {
            format!("{} (default)", row.locale)
        } else {
            row.locale.clone()
        };
        table.add_row(vec![locale, row.keys.to_string(), row.skipped.to_string()]);
    }

    table
}
