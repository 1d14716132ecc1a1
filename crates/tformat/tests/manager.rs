//! Integration tests for locale resolution, manager chains and substitutions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tformat::{
    ChainError, LoadError, LoadMode, LoadWarning, LocaleId, LocaleManager, ManagerConfig,
    RawTranslations, Substitution, TranslateError, Value, args,
};

fn locale(tag: &str) -> LocaleId {
    tag.parse().unwrap()
}

fn raw(entries: &[(&str, &[(&str, &str)])]) -> RawTranslations {
    entries
        .iter()
        .map(|(tag, pairs)| {
            let pairs = pairs
                .iter()
                .map(|(key, pattern)| (key.to_string(), pattern.to_string()))
                .collect::<BTreeMap<_, _>>();
            (locale(tag), pairs)
        })
        .collect()
}

fn loaded(config: ManagerConfig, raw: &RawTranslations) -> LocaleManager {
    let manager = LocaleManager::new(config);
    manager.load(raw).unwrap();
    manager
}

fn german_and_english() -> RawTranslations {
    raw(&[
        (
            "de-DE",
            &[("greeting", "Hallo {0}!"), ("farewell", "Tschüss"), ("only.de", "nur deutsch")],
        ),
        ("en-US", &[("greeting", "Hello {0}!"), ("farewell", "Bye")]),
    ])
}

/// Looks up another key through the manager it is resolved against.
#[derive(Debug)]
struct Nested(&'static str);

impl Substitution for Nested {
    fn resolve(&self, locale: &LocaleId, manager: &LocaleManager) -> Value {
        manager.translate(locale, self.0, &[]).into()
    }
}

// =========================================================================
// Locale Fallback
// =========================================================================

#[test]
fn exact_locale_is_used() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    assert_eq!(manager.translate(&LocaleId::US, "greeting", &args!["Ana"]), "Hello Ana!");
}

#[test]
fn missing_key_falls_back_to_default_locale() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    assert_eq!(manager.translate(&LocaleId::US, "only.de", &args![]), "nur deutsch");
}

#[test]
fn unknown_locale_behaves_like_default() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    assert_eq!(manager.translate(&locale("fr-FR"), "farewell", &args![]), "Tschüss");
}

#[test]
fn fallback_formats_with_default_locale_conventions() {
    let manager = loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("score", "{0}")]), ("en-US", &[("other", "x")])]),
    );
    assert_eq!(manager.translate(&LocaleId::US, "score", &args![1234.5]), "1.234,5");
}

#[test]
fn configured_default_locale_is_honored() {
    let config = ManagerConfig::builder().default_locale(LocaleId::US).build();
    let manager = loaded(config, &german_and_english());
    assert_eq!(manager.translate(&locale("fr-FR"), "farewell", &args![]), "Bye");
}

#[test]
fn accepted_locales_restrict_direct_lookups() {
    let config = ManagerConfig::builder()
        .accepted_locales(BTreeSet::from([LocaleId::GERMANY]))
        .build();
    let manager = loaded(config, &german_and_english());
    assert_eq!(manager.translate(&LocaleId::US, "farewell", &args![]), "Tschüss");
}

#[test]
fn missing_everywhere_returns_key() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    assert_eq!(manager.translate(&LocaleId::US, "nope", &args![]), "nope");
}

#[test]
fn empty_manager_returns_key() {
    let manager = LocaleManager::new(ManagerConfig::default());
    assert_eq!(manager.translate(&LocaleId::GERMANY, "greeting", &args!["x"]), "greeting");
}

// =========================================================================
// Strict and Lenient Translation
// =========================================================================

#[test]
fn strict_reports_missing_translation_with_suggestions() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    let err = manager
        .strict()
        .translate(&LocaleId::US, "greting", &args![])
        .unwrap_err();
    assert_eq!(
        err,
        TranslateError::MissingTranslation {
            key: "greting".to_string(),
            locale: LocaleId::US,
            suggestions: vec!["greeting".to_string()],
        }
    );
}

#[test]
fn strict_reports_format_errors() {
    let manager = loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("count", "{0,number}")])]),
    );
    let err = manager
        .strict()
        .translate(&LocaleId::GERMANY, "count", &args!["many"])
        .unwrap_err();
    assert!(matches!(err, TranslateError::Format { .. }));
    assert_eq!(err.key(), "count");
}

#[test]
fn lenient_replaces_format_errors_with_key() {
    let manager = loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("count", "{0,number}")])]),
    );
    assert_eq!(manager.translate(&LocaleId::GERMANY, "count", &args!["many"]), "count");
}

#[test]
fn strict_succeeds_like_lenient() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    let text = manager.strict().translate(&LocaleId::GERMANY, "greeting", &args!["Jo"]);
    assert_eq!(text, Ok("Hallo Jo!".to_string()));
}

#[test]
fn has_translation_follows_default_fallback() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    assert!(manager.has_translation(&LocaleId::US, "only.de"));
    assert!(manager.has_translation(&locale("fr-FR"), "greeting"));
    assert!(!manager.has_translation(&LocaleId::US, "nope"));
}

// =========================================================================
// Manager Chains
// =========================================================================

#[test]
fn child_delegates_missing_keys_to_parent() {
    let parent = Arc::new(loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("shared", "gemeinsam")])]),
    ));
    let child = LocaleManager::with_parent(ManagerConfig::default(), parent).unwrap();
    child
        .load(&raw(&[("de-DE", &[("own", "eigen")])]))
        .unwrap();

    assert_eq!(child.translate(&LocaleId::GERMANY, "own", &args![]), "eigen");
    assert_eq!(child.translate(&LocaleId::GERMANY, "shared", &args![]), "gemeinsam");
}

#[test]
fn parent_uses_its_own_default_locale() {
    let parent_config = ManagerConfig::builder().default_locale(LocaleId::US).build();
    let parent = Arc::new(loaded(
        parent_config,
        &raw(&[("en-US", &[("shared", "shared text")])]),
    ));
    let child = LocaleManager::with_parent(ManagerConfig::default(), parent).unwrap();
    assert_eq!(child.translate(&locale("fr-FR"), "shared", &args![]), "shared text");
}

#[test]
fn child_shadows_parent() {
    let parent = Arc::new(loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("title", "parent")])]),
    ));
    let child = LocaleManager::with_parent(ManagerConfig::default(), parent).unwrap();
    child.load(&raw(&[("de-DE", &[("title", "child")])])).unwrap();
    assert_eq!(child.translate(&LocaleId::GERMANY, "title", &args![]), "child");
}

#[test]
fn identity_parent_answers_with_key() {
    let child = LocaleManager::with_parent(ManagerConfig::default(), Arc::new(LocaleManager::identity())).unwrap();
    let result = child.strict().translate(&LocaleId::GERMANY, "menu.title", &args![]);
    assert_eq!(result, Ok("menu.title".to_string()));
}

#[test]
fn identity_manager_ignores_loaded_table() {
    let identity = LocaleManager::identity();
    identity.load(&german_and_english()).unwrap();
    assert!(identity.is_identity());
    assert_eq!(identity.translate(&LocaleId::GERMANY, "greeting", &args!["x"]), "greeting");
}

#[test]
fn chain_depth_counts_every_manager() {
    let root = Arc::new(LocaleManager::new(ManagerConfig::default()));
    let middle = Arc::new(LocaleManager::with_parent(ManagerConfig::default(), root).unwrap());
    let leaf = LocaleManager::with_parent(ManagerConfig::default(), middle).unwrap();
    assert_eq!(leaf.chain_depth(), 3);
    assert!(leaf.parent().is_some());
}

#[test]
fn chain_longer_than_limit_is_rejected() {
    let config = ManagerConfig::builder().max_chain_depth(2).build();
    let root = Arc::new(LocaleManager::new(ManagerConfig::default()));
    let middle = Arc::new(LocaleManager::with_parent(config.clone(), root).unwrap());
    let err = LocaleManager::with_parent(config, middle).unwrap_err();
    assert_eq!(err, ChainError::TooDeep { depth: 3, max: 2 });
}

// =========================================================================
// Substitutions
// =========================================================================

#[test]
fn substitution_is_resolved_before_formatting() {
    let manager = loaded(
        ManagerConfig::default(),
        &raw(&[
            ("de-DE", &[("kill", "{0} hat {1} getötet"), ("unknown", "Unbekannt")]),
            ("en-US", &[("kill", "{0} killed {1}"), ("unknown", "Unknown")]),
        ]),
    );
    let args = [Value::from("Ana"), Value::substitution(Nested("unknown"))];
    assert_eq!(manager.translate(&LocaleId::US, "kill", &args), "Ana killed Unknown");
    assert_eq!(manager.translate(&LocaleId::GERMANY, "kill", &args), "Ana hat Unbekannt getötet");
}

#[test]
fn substitutions_inside_sequences_are_resolved() {
    let manager = loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("list", "{0,range,{0;, ;n}}"), ("sword", "Schwert")])]),
    );
    let items = Value::Sequence(vec![Value::substitution(Nested("sword")), Value::from("Bogen")]);
    assert_eq!(manager.translate(&LocaleId::GERMANY, "list", &[items]), "Schwert, Bogen");
}

#[test]
fn parent_resolves_substitutions_against_itself() {
    let parent = Arc::new(loaded(
        ManagerConfig::default(),
        &raw(&[("de-DE", &[("wrap", "[{0}]"), ("inner", "Eltern")])]),
    ));
    let child = LocaleManager::with_parent(ManagerConfig::default(), parent).unwrap();
    child.load(&raw(&[("de-DE", &[("inner", "Kind")])])).unwrap();

    let args = [Value::substitution(Nested("inner"))];
    assert_eq!(child.translate(&LocaleId::GERMANY, "wrap", &args), "[Eltern]");
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn lenient_load_skips_bad_patterns() {
    let manager = LocaleManager::new(ManagerConfig::default());
    let report = manager
        .load(&raw(&[("de-DE", &[("good", "ok {0}"), ("bad", "broken {0")])]))
        .unwrap();

    assert_eq!(report.key_counts.get(&LocaleId::GERMANY), Some(&1));
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(&report.warnings[0], LoadWarning::SkippedPattern { key, .. } if key == "bad"));
    assert_eq!(manager.translate(&LocaleId::GERMANY, "bad", &args![]), "bad");
}

#[test]
fn strict_load_keeps_previous_table() {
    let config = ManagerConfig::builder().load_mode(LoadMode::Strict).build();
    let manager = loaded(config, &raw(&[("de-DE", &[("title", "alt")])]));

    let err = manager
        .load(&raw(&[("de-DE", &[("title", "neu"), ("bad", "{x}")])]))
        .unwrap_err();
    assert!(matches!(err, LoadError::Pattern { ref key, .. } if key == "bad"));
    assert_eq!(manager.translate(&LocaleId::GERMANY, "title", &args![]), "alt");
}

#[test]
fn reload_replaces_whole_table() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    manager
        .load(&raw(&[("de-DE", &[("fresh", "neu")])]))
        .unwrap();

    assert_eq!(manager.loaded_locales(), BTreeSet::from([LocaleId::GERMANY]));
    assert_eq!(manager.translate(&LocaleId::GERMANY, "fresh", &args![]), "neu");
    assert_eq!(manager.translate(&LocaleId::GERMANY, "greeting", &args![]), "greeting");
}

#[test]
fn report_summary_lists_key_counts() {
    let manager = LocaleManager::new(ManagerConfig::default());
    let report = manager.load(&german_and_english()).unwrap();
    assert_eq!(report.summary(), "de-DE (3 keys) | en-US (2 keys)");
}

#[test]
fn snapshot_outlives_reload() {
    let manager = loaded(ManagerConfig::default(), &german_and_english());
    let before = manager.snapshot();
    manager.load(&RawTranslations::new()).unwrap();

    assert_eq!(before.key_count(&LocaleId::GERMANY), 3);
    assert!(manager.snapshot().is_empty());
}
