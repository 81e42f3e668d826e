//! mockfix 命令行集成测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn mockfix() -> Command {
    Command::cargo_bin("mockfix").unwrap()
}

const LEGACY: &str = "global.fetch = vi.fn(() => Promise.resolve({ ok: true, json: () => ({}) }));\n";

#[test]
fn scan_lists_files_needing_fix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("old.test.js"), LEGACY).unwrap();
    fs::write(
        dir.path().join("new.test.jsx"),
        "global.fetch = vi.fn(() => Promise.resolve({ headers: new Headers(), json: () => ({}) }));\n",
    )
    .unwrap();

    mockfix()
        .args(["scan", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 test files"))
        .stdout(predicate::str::contains("Files needing fix: 1"))
        .stdout(predicate::str::contains("old.test.js"))
        .stdout(predicate::str::contains("✅"));
}

#[test]
fn scan_of_empty_directory_succeeds() {
    let dir = TempDir::new().unwrap();
    mockfix()
        .args(["scan", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 test files"))
        .stdout(predicate::str::contains("Files needing fix: 0"))
        .stdout(predicate::str::contains("❌").not());
}

#[test]
fn rewrite_updates_target_in_place() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("weatherApi.test.js");
    fs::write(&target, "expect(apiRequest).toHaveBeenCalledWith('/health');\n").unwrap();

    mockfix()
        .args(["rewrite", "--target"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Fixed weatherApi.test.js expectations!"))
        .stdout(predicate::str::contains("Applied 10 replacements"));

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "expect(apiRequest).toHaveBeenCalledWith('/health', { method: 'GET' });\n"
    );
}

#[test]
fn rewrite_dry_run_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("weatherApi.test.js");
    let original = "expect(apiRequest).toHaveBeenCalledWith('/locations/popular');\n";
    fs::write(&target, original).unwrap();

    mockfix()
        .args(["rewrite", "--dry-run", "--target"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("+expect(apiRequest).toHaveBeenCalledWith('/locations/popular', { method: 'GET' });"))
        .stdout(predicate::str::contains("not modified"));

    assert_eq!(fs::read_to_string(&target).unwrap(), original);
}

#[test]
fn rewrite_of_missing_target_fails() {
    let dir = TempDir::new().unwrap();
    mockfix()
        .args(["rewrite", "--target"])
        .arg(dir.path().join("absent.test.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.test.js"));
}

#[test]
fn rewrite_with_custom_rule_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("api.test.js");
    let rules = dir.path().join("rules.toml");
    fs::write(&target, "fetchJson('/a');\nfetchJson('/b');\n").unwrap();
    fs::write(
        &rules,
        "[[replacements]]\nid = \"fetch-json\"\npattern = \"fetchJson\\\\(\"\nreplacement = \"apiRequest(\"\n",
    )
    .unwrap();

    mockfix()
        .args(["rewrite", "--target"])
        .arg(&target)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 replacements"));

    assert_eq!(fs::read_to_string(&target).unwrap(), "apiRequest('/a');\napiRequest('/b');\n");
}

#[test]
fn invalid_rule_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "[[replacements]]\nid = \"bad\"\npattern = \"(\"\nreplacement = \"\"\n").unwrap();

    mockfix()
        .args(["scan", "--root"])
        .arg(dir.path())
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success();

    mockfix()
        .args(["rewrite", "--target"])
        .arg(dir.path().join("x.test.js"))
        .arg("--rules")
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad"));
}
