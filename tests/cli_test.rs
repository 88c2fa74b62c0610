//! CLI contract tests
//!
//! Runs the compiled binary against JSON syntax dumps in temp directories and
//! checks output formats, exit codes, config handling and the subcommands.

use std::path::Path;
use std::process::{Command, Output};

const SETTINGS_DUMP: &str = r#"{
  "path": "app/ui/Settings.kt",
  "type_resolution": false,
  "root": {
    "kind": "call",
    "callee": "Column",
    "trailing_block": [
      {
        "kind": "call",
        "callee": "Checkbox",
        "span": { "start": 120, "end": 164, "line": 8, "column": 5 },
        "args": [
          { "name": "checked", "value": { "kind": "opaque", "text": "enabled" } }
        ]
      },
      {
        "kind": "call",
        "callee": "Text",
        "args": [ { "value": { "kind": "string", "raw": "Notifications" } } ]
      }
    ]
  }
}"#;

const CLEAN_DUMP: &str = r#"{
  "path": "app/ui/Home.kt",
  "root": {
    "kind": "call",
    "callee": "Text",
    "args": [ { "name": "text", "value": { "kind": "string", "raw": "Welcome" } } ]
  }
}"#;

fn a11ylint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_a11ylint"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("A11YLINT_CONFIG")
        .env_remove("CLICOLOR_FORCE")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn setup_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let dumps = dir.path().join("build/a11y");
    std::fs::create_dir_all(&dumps).unwrap();
    std::fs::write(dumps.join("Settings.kt.ast.json"), SETTINGS_DUMP).unwrap();
    std::fs::write(dumps.join("Home.kt.ast.json"), CLEAN_DUMP).unwrap();
    dir
}

#[test]
fn text_output_lists_findings() {
    let dir = setup_project();
    let out = a11ylint(dir.path(), &["."]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("app/ui/Settings.kt"));
    assert!(text.contains("8:5"));
    assert!(text.contains("checkbox-missing-accessibility-label"));
    assert!(text.contains("1 findings (1 warning, 0 info) in 1 of 2 files"));
    assert!(text.contains("skipped image-content-description in 2 of 2 files"));
    assert!(!text.contains("app/ui/Home.kt"));
    assert!(!text.contains('\x1b'), "no colors when piped");
}

#[test]
fn json_output_is_machine_readable() {
    let dir = setup_project();
    let out = a11ylint(dir.path(), &["build", "--format", "json"]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["summary"]["total"], 1);
    assert_eq!(report["summary"]["files_analyzed"], 2);
    // Dumps are sorted, so Home comes first
    assert_eq!(report["files"][0]["path"], "app/ui/Home.kt");
    assert_eq!(
        report["files"][1]["skipped_rules"][0]["rule_id"],
        "image-content-description"
    );
}

#[test]
fn sarif_written_to_output_file() {
    let dir = setup_project();
    let out = a11ylint(
        dir.path(),
        &[".", "--format", "sarif", "--output", "a11y.sarif.json"],
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).is_empty());
    let content = std::fs::read_to_string(dir.path().join("a11y.sarif.json")).unwrap();
    let sarif: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(
        sarif["runs"][0]["results"][0]["ruleId"],
        "checkbox-missing-accessibility-label"
    );
}

#[test]
fn fail_on_threshold_sets_exit_code() {
    let dir = setup_project();
    let out = a11ylint(dir.path(), &[".", "--fail-on", "warning"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("--fail-on=warning"));

    // Only the clean dump: nothing to fail on
    let out = a11ylint(
        dir.path(),
        &["build/a11y/Home.kt.ast.json", "--fail-on", "info"],
    );
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

#[test]
fn fail_on_from_config_defaults() {
    let dir = setup_project();
    std::fs::write(
        dir.path().join("a11ylint.toml"),
        "[defaults]\nfail_on = \"warning\"\nformat = \"json\"\n",
    )
    .unwrap();

    let out = a11ylint(dir.path(), &["."]);
    assert_eq!(out.status.code(), Some(1));
    assert!(serde_json::from_str::<serde_json::Value>(&stdout(&out)).is_ok());
}

#[test]
fn broken_dump_is_skipped() {
    let dir = setup_project();
    std::fs::write(dir.path().join("build/a11y/Broken.kt.ast.json"), "{ not json").unwrap();

    let out = a11ylint(dir.path(), &["."]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Broken.kt.ast.json"));
    // The other dumps were still checked
    assert!(stdout(&out).contains("checkbox-missing-accessibility-label"));
}

#[test]
fn config_disables_rule_and_excludes_paths() {
    let dir = setup_project();
    std::fs::write(
        dir.path().join("a11ylint.toml"),
        "[rules.CheckboxMissingAccessibilityLabel]\nenabled = false\n",
    )
    .unwrap();

    let out = a11ylint(dir.path(), &["."]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("No accessibility findings in 2 files"));

    std::fs::write(
        dir.path().join("a11ylint.toml"),
        "[exclude]\npaths = [\"**/Settings.kt.ast.json\"]\n",
    )
    .unwrap();
    let out = a11ylint(dir.path(), &[".", "--format", "json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["summary"]["files_analyzed"], 1);
}

#[test]
fn invalid_config_fails_before_analysis() {
    let dir = setup_project();
    std::fs::write(
        dir.path().join("a11ylint.toml"),
        "[rules.god-class]\nenabled = false\n",
    )
    .unwrap();

    let out = a11ylint(dir.path(), &["."]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("god-class"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn errors_exit_apart_from_findings_and_dump_failures() {
    let dir = setup_project();

    // Usage errors
    let out = a11ylint(dir.path(), &[".", "--workers", "100"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("workers cannot exceed 64"));

    let out = a11ylint(dir.path(), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("a11ylint"));

    // A misspelled config key is an error even with --fail-on set
    std::fs::write(dir.path().join("a11ylint.toml"), "[defaults]\nfail-on = \"warning\"\n")
        .unwrap();
    let out = a11ylint(dir.path(), &[".", "--fail-on", "warning"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("fail-on"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn explicit_config_file() {
    let dir = setup_project();
    std::fs::write(
        dir.path().join("ci.json"),
        r#"{ "rules": { "checkbox-missing-accessibility-label": { "severity": "info" } } }"#,
    )
    .unwrap();

    let out = a11ylint(dir.path(), &[".", "--config", "ci.json", "--format", "json"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["summary"]["info"], 1);
    assert_eq!(report["summary"]["warning"], 0);
}

#[test]
fn missing_path_is_an_error() {
    let dir = setup_project();
    let out = a11ylint(dir.path(), &["does-not-exist"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("does-not-exist"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let out = a11ylint(dir.path(), &["init"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(dir.path().join("a11ylint.toml").is_file());

    let out = a11ylint(dir.path(), &["init"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("already exists"));
}

#[test]
fn rules_lists_every_rule() {
    let dir = tempfile::tempdir().unwrap();
    let out = a11ylint(dir.path(), &["rules"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    for id in [
        "clickable-modifier-missing-on-click-label",
        "clickable-element-missing-accessibility-label",
        "text-field-missing-accessibility-label",
        "icon-only-button-missing-accessibility-label",
        "image-content-description",
        "checkbox-missing-accessibility-label",
    ] {
        assert!(text.contains(id), "{} not listed", id);
    }
}
