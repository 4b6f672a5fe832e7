use std::fs;

use classmatch::commands::{best_match_command, init_config_command, MatchOverrides};
use classmatch::logging::default_directive;
use classmatch::{load_config, load_dump, write_output};
use classmatch_core::config::MatchConfig;
use classmatch_core::obfuscation::ClassifierKind;
use tempfile::tempdir;

#[test]
fn load_config_defaults_without_path() {
    let config = load_config(None).expect("default config");
    assert_eq!(config, MatchConfig::default());
}

#[test]
fn load_config_reads_given_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("match.json");
    fs::write(&path, r#"{ "classifier": "always" }"#).expect("write config");
    let config = load_config(Some(&path)).expect("config");
    assert_eq!(config.classifier, ClassifierKind::Always);
}

#[test]
fn load_dump_reports_unsupported_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dump.txt");
    fs::write(&path, "{}").expect("write dump");
    let err = load_dump(&path).expect_err("unsupported extension");
    assert!(format!("{err:#}").contains("Unsupported class dump extension"));
}

#[test]
fn load_dump_reads_yaml() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dump.yaml");
    fs::write(&path, "classes:\n  - name: Lcom/app/Main;\n    fields: null\n").expect("write dump");
    let dump = load_dump(&path).expect("dump");
    assert_eq!(dump.classes.len(), 1);
    assert!(dump.classes[0].fields.is_none());
    assert!(!dump.classes[0].external);
}

#[test]
fn write_output_creates_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("deeper").join("out.json");
    write_output(Some(&path), "{}").expect("write output");
    assert_eq!(fs::read_to_string(&path).expect("read output"), "{}");
}

#[test]
fn init_config_command_respects_force() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("classmatch.json");

    init_config_command(&path, false).expect("first write");
    assert!(init_config_command(&path, false).is_err());
    init_config_command(&path, true).expect("forced write");
    assert_eq!(MatchConfig::load(&path).expect("reload"), MatchConfig::default());
}

#[test]
fn best_match_command_rejects_unknown_classes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("matches.json");
    fs::write(&path, r#"{ "La;": { "Lb;": 1.0 } }"#).expect("write matches");

    best_match_command(&path, "La;", false).expect("known class");
    let err = best_match_command(&path, "Lz;", true).expect_err("unknown class");
    assert!(err.to_string().contains("Lz;"));
}

#[test]
fn default_directive_tracks_verbosity() {
    assert_eq!(default_directive(0), "warn");
    assert_eq!(default_directive(1), "info");
    assert_eq!(default_directive(2), "debug");
    assert_eq!(default_directive(9), "trace");
}

#[test]
fn match_overrides_default_to_no_changes() {
    let overrides = MatchOverrides::default();
    assert!(overrides.classifier.is_none());
    assert!(overrides.max_candidates.is_none());
    assert!(!overrides.no_package_matching);
    assert!(!overrides.no_name_matching);
}
