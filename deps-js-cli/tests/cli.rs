use assert_cmd::Command;
use predicates::str::contains;
use predicates::str::is_empty;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

fn deps_js() -> Command {
  Command::cargo_bin("deps-js").unwrap()
}

#[test]
fn resolve_lists_every_file() {
  let entry = fixture("ok/main.ts");
  let output = deps_js()
    .args(["resolve", "--allow", "@playwright/test"])
    .arg(entry.as_os_str())
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let stdout = String::from_utf8(output).unwrap();
  let lines: Vec<&str> = stdout.lines().collect();
  assert_eq!(lines.len(), 3, "unexpected output: {stdout:?}");
  assert!(stdout.contains("lib/format.ts"), "{stdout:?}");
  assert!(stdout.contains("lib/strings.js"), "{stdout:?}");
}

#[test]
fn config_file_supplies_allowed_packages() {
  deps_js()
    .args(["resolve", "--config"])
    .arg(fixture("config.json").as_os_str())
    .arg(fixture("ok/main.ts").as_os_str())
    .assert()
    .success();
}

#[test]
fn disallowed_package_fails() {
  deps_js()
    .args(["resolve"])
    .arg(fixture("ok/main.ts").as_os_str())
    .assert()
    .failure()
    .stdout(is_empty())
    .stderr(contains("unsupported dependencies"))
    .stderr(contains("@playwright/test"));
}

#[test]
fn no_builtins_rejects_node_modules() {
  deps_js()
    .args(["resolve", "--no-builtins", "--allow", "@playwright/test"])
    .arg(fixture("ok/main.ts").as_os_str())
    .assert()
    .failure()
    .stderr(contains("node:fs"));
}

#[test]
fn json_report_lists_every_problem() {
  let entry = fixture("broken/main.js");
  let run = || {
    deps_js()
      .args(["resolve", "--json"])
      .arg(entry.as_os_str())
      .assert()
      .failure()
      .get_output()
      .stdout
      .clone()
  };

  let output1 = String::from_utf8(run()).unwrap();
  let output2 = String::from_utf8(run()).unwrap();
  assert_eq!(output1, output2, "expected deterministic JSON output across runs");

  let json: Value = serde_json::from_str(&output1).expect("valid JSON output");
  let error = &json["error"];
  assert_eq!(error["kind"], "dependencies");
  assert_eq!(error["parseErrors"].as_array().map(Vec::len), Some(1));
  assert_eq!(error["unsupportedExternals"][0]["names"][0], "moment");
  let missing = error["missingFiles"][0]["path"].as_str().unwrap();
  assert!(missing.ends_with("broken/gone"), "{missing}");
}

#[test]
fn json_success_maps_paths_to_contents() {
  let entry = fixture("ok/main.ts");
  let output = deps_js()
    .args(["resolve", "--json", "--allow", "@playwright/test"])
    .arg(entry.as_os_str())
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let json: Value = serde_json::from_slice(&output).expect("valid JSON output");
  let files = json["files"].as_object().expect("files object");
  assert_eq!(files.len(), 3);
  let strings = files
    .iter()
    .find(|(path, _)| path.ends_with("strings.js"))
    .map(|(_, content)| content.as_str().unwrap())
    .expect("strings.js in output");
  assert!(strings.contains("module.exports"));
}

#[test]
fn unsupported_entrypoint_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let entry = dir.path().join("main.mjs");
  std::fs::write(&entry, "export {};\n").unwrap();
  deps_js()
    .args(["resolve", "--json"])
    .arg(entry.as_os_str())
    .assert()
    .failure()
    .stdout(contains("\"kind\": \"unsupportedEntrypoint\""));
}

#[test]
fn max_files_bounds_the_traversal() {
  deps_js()
    .args(["resolve", "--allow", "@playwright/test", "--max-files", "2"])
    .arg(fixture("ok/main.ts").as_os_str())
    .assert()
    .failure()
    .stderr(contains("more than 2 files"));
}

#[test]
fn zero_max_files_is_rejected() {
  deps_js()
    .args(["resolve", "--max-files", "0"])
    .arg(fixture("ok/main.ts").as_os_str())
    .assert()
    .code(2)
    .stderr(contains("--max-files"));
}
