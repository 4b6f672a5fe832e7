use std::fs;

use classmatch_core::config::MatchConfig;
use classmatch_core::obfuscation::{ClassifierKind, Dictionary};
use classmatch_core::signature::SignatureWeights;
use tempfile::tempdir;

#[test]
fn defaults_match_documented_values() {
    let config = MatchConfig::default();
    assert_eq!(config.classifier, ClassifierKind::Score);
    assert!(config.memoize);
    assert_eq!(config.max_candidates, 3);
    assert!(config.match_packages);
    assert!(config.match_by_name);
    assert_eq!(config.shingle_size, 4);
    assert_eq!(config.weights, SignatureWeights::default());
    assert_eq!(config.external_prefixes, vec!["Landroid/".to_string(), "Ljava/".to_string()]);
    assert!(config.filters.exclude_arrays);
    assert!(config.dictionary_path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn load_json_fills_missing_fields_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.json");
    fs::write(
        &path,
        r#"{ "classifier": "never", "max_candidates": 5, "weights": { "member_count": 2.0 } }"#,
    )
    .expect("write config");

    let config = MatchConfig::load(&path).expect("load config");
    assert_eq!(config.classifier, ClassifierKind::Never);
    assert_eq!(config.max_candidates, 5);
    assert_eq!(config.weights.member_count, 2.0);
    assert_eq!(config.weights.superclass_hash, SignatureWeights::default().superclass_hash);
    assert!(config.match_packages);
}

#[test]
fn load_yaml_config() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.yml");
    fs::write(
        &path,
        "classifier: set-membership\nmatch_packages: false\nfilters:\n  include_prefixes:\n    - Lcom/app/\n",
    )
    .expect("write config");

    let config = MatchConfig::load(&path).expect("load config");
    assert_eq!(config.classifier, ClassifierKind::SetMembership);
    assert!(!config.match_packages);
    assert_eq!(config.filters.include_prefixes, vec!["Lcom/app/".to_string()]);
    assert!(!config.filters.exclude_prefixes.is_empty());
}

#[test]
fn save_then_load_preserves_every_option() {
    let dir = tempdir().expect("tempdir");
    let mut config = MatchConfig::default();
    config.classifier = ClassifierKind::Always;
    config.max_candidates = 7;
    config.weights.string_literals_count = 0.75;

    for name in ["match.json", "match.yaml"] {
        let path = dir.path().join(name);
        config.save(&path).expect("save config");
        assert_eq!(MatchConfig::load(&path).expect("load config"), config);
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.json");
    fs::write(&path, r#"{ "max_candidate": 5 }"#).expect("write config");

    let err = MatchConfig::load(&path).expect_err("unknown field");
    assert!(format!("{err:#}").contains("max_candidate"));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.json");

    fs::write(&path, r#"{ "max_candidates": 0 }"#).expect("write config");
    let err = MatchConfig::load(&path).expect_err("zero candidates");
    assert!(format!("{err:#}").contains("max_candidates"));

    fs::write(&path, r#"{ "weights": { "method_count": -0.5 } }"#).expect("write config");
    let err = MatchConfig::load(&path).expect_err("negative weight");
    assert!(format!("{err:#}").contains("method_count"));

    let config = MatchConfig { shingle_size: 0, ..MatchConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn unsupported_extensions_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.toml");
    fs::write(&path, "classifier = \"score\"").expect("write config");

    let err = MatchConfig::load(&path).expect_err("unsupported extension");
    assert!(err.to_string().contains("Unsupported config extension"));
    assert!(MatchConfig::default().save(&path).is_err());
}

#[test]
fn dictionary_path_replaces_bundled_words() {
    let dir = tempdir().expect("tempdir");
    let words = dir.path().join("words.txt");
    fs::write(&words, "zebra\n").expect("write words");

    let config = MatchConfig { dictionary_path: Some(words), ..MatchConfig::default() };
    let dictionary = config.dictionary().expect("dictionary");
    assert!(dictionary.contains("zebras"));
    assert!(!dictionary.contains("main"));

    let missing = MatchConfig { dictionary_path: Some(dir.path().join("nope.txt")), ..MatchConfig::default() };
    assert!(missing.dictionary().is_err());
}
