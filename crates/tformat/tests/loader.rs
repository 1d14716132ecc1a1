//! Integration tests for reading translation bundles from disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tformat::loader::{Manifest, load_bundle, parse_properties};
use tformat::{LoadError, LocaleId, LocaleManager, ManagerConfig, args};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn bundle() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "language.json",
        r#"[
            { "language": "de", "country": "DE", "file": "de_DE.properties", "version": "2" },
            { "language": "en", "country": "US", "file": "en_US.properties" }
        ]"#,
    );
    write(
        dir.path(),
        "de_DE.properties",
        "# Begrüßung\ngreeting = Hallo {0}!\nitems = {0,range,{0;, ;n-1} und {n}}\n",
    );
    write(dir.path(), "en_US.properties", "greeting: Hello {0}!\n");
    dir
}

// =========================================================================
// Bundles
// =========================================================================

#[test]
fn bundle_is_read_per_manifest_entry() {
    let dir = bundle();
    let raw = load_bundle(dir.path()).unwrap();

    assert_eq!(raw.len(), 2);
    assert_eq!(raw[&LocaleId::GERMANY]["greeting"], "Hallo {0}!");
    assert_eq!(raw[&LocaleId::US]["greeting"], "Hello {0}!");
}

#[test]
fn manager_loads_bundle_directory() {
    let dir = bundle();
    let manager = LocaleManager::new(ManagerConfig::default());
    let report = manager.load_bundle(dir.path()).unwrap();

    assert_eq!(report.summary(), "de-DE (2 keys) | en-US (1 keys)");
    assert_eq!(manager.translate(&LocaleId::US, "greeting", &args!["Ana"]), "Hello Ana!");
    assert_eq!(
        manager.translate(&LocaleId::US, "items", &args![vec!["a", "b", "c"]]),
        "a, b und c"
    );
}

#[test]
fn locale_listed_twice_is_merged() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "language.json",
        r#"[
            { "language": "de", "country": "DE", "file": "base.properties" },
            { "language": "de", "country": "DE", "file": "extra.properties" }
        ]"#,
    );
    write(dir.path(), "base.properties", "a = 1\nb = 2\n");
    write(dir.path(), "extra.properties", "b = zwei\nc = 3\n");

    let raw = load_bundle(dir.path()).unwrap();
    let german = &raw[&LocaleId::GERMANY];
    assert_eq!(german.len(), 3);
    assert_eq!(german["b"], "zwei");
}

#[test]
fn missing_manifest_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_bundle(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Io { ref path, .. } if path.ends_with("language.json")));
}

#[test]
fn missing_translation_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "language.json",
        r#"[{ "language": "de", "country": "DE", "file": "gone.properties" }]"#,
    );
    let err = load_bundle(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Io { ref path, .. } if path.ends_with("gone.properties")));
}

#[test]
fn malformed_manifest_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "language.json", r#"{ "language": "de" }"#);
    assert!(matches!(load_bundle(dir.path()), Err(LoadError::Manifest { .. })));
}

#[test]
fn invalid_manifest_locale_is_reported() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "language.json",
        r#"[{ "language": "not a language", "file": "x.properties" }]"#,
    );
    assert!(matches!(load_bundle(dir.path()), Err(LoadError::Manifest { .. })));
}

#[test]
fn malformed_properties_reports_file_and_line() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "language.json",
        r#"[{ "language": "de", "country": "DE", "file": "de.properties" }]"#,
    );
    write(dir.path(), "de.properties", "ok = fine\n\nbad = \\uZZZZ\n");

    let err = load_bundle(dir.path()).unwrap_err();
    let LoadError::Properties { path, source } = err else {
        panic!("expected a properties error");
    };
    assert!(path.ends_with("de.properties"));
    assert_eq!(source.line, 3);
}

#[test]
fn failed_bundle_load_keeps_previous_table() {
    let dir = bundle();
    let manager = LocaleManager::new(ManagerConfig::default());
    manager.load_bundle(dir.path()).unwrap();

    let empty = TempDir::new().unwrap();
    assert!(manager.load_bundle(empty.path()).is_err());
    assert_eq!(manager.translate(&LocaleId::GERMANY, "greeting", &args!["Jo"]), "Hallo Jo!");
}

// =========================================================================
// Manifest
// =========================================================================

#[test]
fn manifest_entry_builds_locale() {
    let manifest = Manifest::from_json(r#"[{ "language": "en", "country": "US", "file": "en.properties" }]"#).unwrap();
    assert_eq!(manifest.entries[0].locale().unwrap(), LocaleId::US);
    assert_eq!(manifest.entries[0].version, None);
}

// =========================================================================
// Properties Syntax
// =========================================================================

#[test]
fn properties_separators() {
    let entries = parse_properties("a=1\nb : 2\nc 3\nd\n").unwrap();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("c".to_string(), "3".to_string()),
            ("d".to_string(), String::new()),
        ]
    );
}

#[test]
fn properties_comments_and_blank_lines_are_skipped() {
    let entries = parse_properties("# one\n! two\n\n   \nkey = value\n").unwrap();
    assert_eq!(entries, vec![("key".to_string(), "value".to_string())]);
}

#[test]
fn properties_continuation_lines() {
    let entries = parse_properties("long = first \\\n        second\n").unwrap();
    assert_eq!(entries, vec![("long".to_string(), "first second".to_string())]);
}

#[test]
fn properties_escapes() {
    let entries = parse_properties("my\\ key = tab\\there\\nnew \\\\ \\u00e9\n").unwrap();
    assert_eq!(
        entries,
        vec![("my key".to_string(), "tab\there\nnew \\ é".to_string())]
    );
}

#[test]
fn properties_keep_pattern_syntax() {
    let entries = parse_properties("kill = {0} killed {1} with ''{2}''\n").unwrap();
    assert_eq!(entries[0].1, "{0} killed {1} with ''{2}''");
}

#[test]
fn properties_duplicate_keys_are_kept_in_order() {
    let entries = parse_properties("a = 1\na = 2\n").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].1, "2");
}

#[test]
fn properties_bad_unicode_escape_is_an_error() {
    let err = parse_properties("a = ok\nb = \\u12").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.message, "malformed entry: invalid unicode escape");
}

#[test]
fn properties_surrogate_pair_escape_is_one_char() {
    let entries = parse_properties("emoji = hi \\uD83D\\uDE00\nok = x\n").unwrap();
    assert_eq!(entries[0].1, "hi \u{1F600}");
    assert_eq!(entries[1].1, "x");
}

#[test]
fn properties_unpaired_surrogate_is_an_error() {
    let err = parse_properties("a = \\uDE00\n").unwrap_err();
    assert_eq!(err.to_string(), "1: malformed entry: invalid unicode escape");
}
