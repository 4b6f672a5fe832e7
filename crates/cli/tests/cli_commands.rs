use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

/// Old and new versions of a tiny app: `a` was renamed to `b`, `Main` kept its name.
fn write_dumps(dir: &Path) -> (PathBuf, PathBuf) {
    let service = |name: &str, literal: &str| {
        json!({
            "name": name,
            "superclass": "Ljava/lang/Object;",
            "fields": [{ "name": "count", "descriptor": "I" }],
            "methods": [{
                "name": "start",
                "descriptor": "()V",
                "instructions": [
                    { "opcode": "const-string", "string": literal },
                    { "opcode": "invoke-virtual" },
                    { "opcode": "return-void" }
                ]
            }]
        })
    };
    let object = json!({ "name": "Ljava/lang/Object;", "external": true });

    let old = json!({ "classes": [service("Lcom/app/a;", "sync"), service("Lcom/app/MainActivity;", "main"), object] });
    let new = json!({ "classes": [service("Lcom/app/b;", "sync"), service("Lcom/app/MainActivity;", "main"), object] });

    let old_path = dir.join("old.json");
    let new_path = dir.join("new.json");
    fs::write(&old_path, serde_json::to_string_pretty(&old).expect("old json")).expect("write old");
    fs::write(&new_path, serde_json::to_string_pretty(&new).expect("new json")).expect("write new");
    (old_path, new_path)
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn match_prints_ranked_candidates() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());

    let output = cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = stdout_json(&output);
    assert_eq!(body["Lcom/app/a;"]["Lcom/app/b;"], 0.0);
    assert_eq!(body["Lcom/app/MainActivity;"]["Lcom/app/MainActivity;"], 0.0);
    assert_eq!(body.as_object().expect("object").len(), 2);
}

#[test]
fn match_writes_output_file_and_summary() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());
    let out = dir.path().join("reports").join("matches.json");

    cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched 2 classes (0 without candidates)"))
        .stdout(predicate::str::contains("Output:"));

    let body: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read output")).expect("json");
    assert!(body.get("Lcom/app/a;").is_some());
}

#[test]
fn match_respects_command_line_overrides() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());

    let output = cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .arg("--classifier")
        .arg("always")
        .arg("--max-candidates")
        .arg("1")
        .arg("--no-package-matching")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = stdout_json(&output);
    for candidates in body.as_object().expect("object").values() {
        assert_eq!(candidates.as_object().expect("candidates").len(), 1);
    }
}

#[test]
fn match_uses_config_file() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());
    let config = dir.path().join("match.yaml");
    fs::write(&config, "classifier: never\nmatch_by_name: false\nmax_candidates: 1\n").expect("write config");

    let output = cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = stdout_json(&output);
    assert_eq!(body["Lcom/app/MainActivity;"].as_object().expect("candidates").len(), 1);
}

#[test]
fn match_fails_for_missing_dump() {
    let dir = tempdir().expect("tempdir");
    let (old, _) = write_dumps(dir.path());

    cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load class dump"));
}

#[test]
fn match_rejects_unknown_classifier() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());

    cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .arg("--classifier")
        .arg("magic")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown classifier"));
}

#[test]
fn match_rejects_zero_candidates() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());

    cargo_bin_cmd!("classmatch")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .arg("--max-candidates")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_candidates"));
}

#[test]
fn classify_reports_class_verdicts() {
    cargo_bin_cmd!("classmatch")
        .arg("classify")
        .arg("com.app.MainActivity")
        .arg("Lcom/app/a;")
        .assert()
        .success()
        .stdout(predicate::str::contains("class\tLcom/app/MainActivity;\tclear"))
        .stdout(predicate::str::contains("class\tLcom/app/a;\tobfuscated"));
}

#[test]
fn classify_packages_as_json() {
    let output = cargo_bin_cmd!("classmatch")
        .arg("classify")
        .arg("--package")
        .arg("--json")
        .arg("Lcom/example/network")
        .arg("Lcom/a/b")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = stdout_json(&output);
    assert_eq!(
        body,
        json!([
            { "name": "Lcom/example/network", "kind": "package", "obfuscated": false },
            { "name": "Lcom/a/b", "kind": "package", "obfuscated": true }
        ])
    );
}

#[test]
fn classify_set_membership_needs_both_versions() {
    cargo_bin_cmd!("classmatch")
        .arg("classify")
        .arg("--classifier")
        .arg("set-membership")
        .arg("Lcom/app/a;")
        .assert()
        .failure()
        .stderr(predicate::str::contains("set-membership needs both compared versions"));

    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());
    cargo_bin_cmd!("classmatch")
        .arg("classify")
        .arg("--classifier")
        .arg("set-membership")
        .arg("--old")
        .arg(&old)
        .arg("--new")
        .arg(&new)
        .arg("Lcom/app/a;")
        .assert()
        .success()
        .stdout(predicate::str::contains("obfuscated"));
}

#[test]
fn signature_prints_one_class() {
    let dir = tempdir().expect("tempdir");
    let (old, _) = write_dumps(dir.path());

    let output = cargo_bin_cmd!("classmatch")
        .arg("signature")
        .arg(&old)
        .arg("--class")
        .arg("com.app.MainActivity")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let body = stdout_json(&output);
    let signature = &body["Lcom/app/MainActivity;"];
    assert_eq!(signature["member_count"], 1);
    assert_eq!(signature["method_count"], 1);
    assert_eq!(signature["instructions_count"], 3);
    assert_eq!(signature["string_literals_count"], 1);
    assert_eq!(body.as_object().expect("object").len(), 1);
}

#[test]
fn signature_of_whole_dump_skips_external_classes() {
    let dir = tempdir().expect("tempdir");
    let (old, _) = write_dumps(dir.path());
    let out = dir.path().join("signatures.json");

    cargo_bin_cmd!("classmatch")
        .arg("signature")
        .arg(&old)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let body: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    let names: Vec<&String> = body.as_object().expect("object").keys().collect();
    assert_eq!(names, vec!["Lcom/app/MainActivity;", "Lcom/app/a;"]);
}

#[test]
fn signature_fails_for_unknown_class() {
    let dir = tempdir().expect("tempdir");
    let (old, _) = write_dumps(dir.path());

    cargo_bin_cmd!("classmatch")
        .arg("signature")
        .arg(&old)
        .arg("--class")
        .arg("Lcom/app/Missing;")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Class Lcom/app/Missing; not found"));
}

#[test]
fn best_match_reads_saved_matches() {
    let dir = tempdir().expect("tempdir");
    let matches = dir.path().join("matches.json");
    fs::write(
        &matches,
        r#"{ "Lcom/app/a;": { "Lcom/app/b;": 0.5, "Lcom/app/c;": 2.0 }, "Lcom/app/d;": {} }"#,
    )
    .expect("write matches");

    cargo_bin_cmd!("classmatch")
        .arg("best-match")
        .arg(&matches)
        .arg("com.app.a")
        .assert()
        .success()
        .stdout(predicate::str::diff("Lcom/app/b;\t0.5\n"));

    let output = cargo_bin_cmd!("classmatch")
        .arg("best-match")
        .arg(&matches)
        .arg("Lcom/app/a;")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        stdout_json(&output),
        json!({ "class": "Lcom/app/a;", "match": "Lcom/app/b;", "rank": 0.5 })
    );

    cargo_bin_cmd!("classmatch")
        .arg("best-match")
        .arg(&matches)
        .arg("Lcom/app/d;")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lcom/app/d; has no candidates"));

    cargo_bin_cmd!("classmatch")
        .arg("best-match")
        .arg(&matches)
        .arg("Lcom/app/zzz;")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not part of"));
}

#[test]
fn init_config_writes_defaults_and_refuses_overwrite() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("classmatch.yaml");

    cargo_bin_cmd!("classmatch")
        .arg("init-config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default match config"));
    let body = fs::read_to_string(&path).expect("read config");
    assert!(body.contains("classifier: score"));

    cargo_bin_cmd!("classmatch")
        .arg("init-config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cargo_bin_cmd!("classmatch").arg("init-config").arg(&path).arg("--force").assert().success();
}

#[test]
fn init_config_defaults_to_json_in_current_dir() {
    let dir = tempdir().expect("tempdir");

    cargo_bin_cmd!("classmatch").current_dir(dir.path()).arg("init-config").assert().success();

    let body: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("classmatch.json")).expect("read config"),
    )
    .expect("json config");
    assert_eq!(body["max_candidates"], 3);
    assert_eq!(body["classifier"], "score");
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let dir = tempdir().expect("tempdir");
    let (old, new) = write_dumps(dir.path());

    let assert = cargo_bin_cmd!("classmatch")
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg("--log-json")
        .arg("match")
        .arg(&old)
        .arg(&new)
        .assert()
        .success()
        .stderr(predicate::str::contains("matching versions"));
    let stdout = assert.get_output().stdout.clone();
    stdout_json(&stdout);
}
