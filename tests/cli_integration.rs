//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test.
fn upkeep() -> Command {
    Command::cargo_bin("upkeep").unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    upkeep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("maintenance task runner"));
}

#[test]
fn test_short_help_flag() {
    upkeep().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    upkeep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    upkeep().assert().failure().stderr(predicate::str::contains("Usage:"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_scaffolds_config() {
    let temp = assert_fs::TempDir::new().unwrap();

    upkeep()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("upkeep.toml"));

    temp.child("upkeep.toml").assert(predicate::str::contains("[modules]"));
    temp.close().unwrap();
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("# mine\n").unwrap();

    upkeep()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Untouched without --force.
    temp.child("upkeep.toml").assert("# mine\n");

    upkeep().args(["init", "--force"]).current_dir(temp.path()).assert().success();
    temp.child("upkeep.toml").assert(predicate::str::contains("[modules]"));
    temp.close().unwrap();
}

// ============================================================================
// List Command Tests
// ============================================================================

#[test]
fn test_list_shows_full_catalog() {
    upkeep()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("go-mod-tidy")
                .and(predicate::str::contains("python-mypy"))
                .and(predicate::str::contains("lua-format")),
        );
}

#[test]
fn test_list_json_output() {
    upkeep()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[").and(predicate::str::contains("\"go-test\"")));
}

// ============================================================================
// Plan Command Tests
// ============================================================================

#[test]
fn test_plan_without_config_is_empty() {
    let temp = assert_fs::TempDir::new().unwrap();

    upkeep()
        .arg("plan")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("empty plan"));

    temp.close().unwrap();
}

#[test]
fn test_plan_reflects_module_inventory() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[modules]\ngo = [\".\"]\n").unwrap();

    upkeep()
        .arg("plan")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("stage 1 (sequential):")
                .and(predicate::str::contains("go-mod-tidy [mutating]"))
                .and(predicate::str::contains("go-vulncheck [verifying]"))
                .and(predicate::str::contains("python").not()),
        );

    temp.close().unwrap();
}

#[test]
fn test_plan_shows_per_module_skip_decisions() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml")
        .write_str("[modules]\ngo = [\".\", \"tools/gen\"]\n\n[skip]\ngo-test = [\"tools/gen\"]\n")
        .unwrap();

    upkeep()
        .arg("plan")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tools/gen (skipped)"));

    temp.close().unwrap();
}

#[test]
fn test_plan_honors_config_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("other.toml").write_str("[modules]\nlua = [\"lua\"]\n").unwrap();

    upkeep()
        .args(["plan", "--config", "other.toml"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lua-format [mutating]"));

    temp.close().unwrap();
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_unknown_target_fails() {
    upkeep()
        .args(["run", "go-frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target: go-frobnicate"));
}

#[test]
fn test_run_fully_skipped_target_is_a_no_op() {
    // A wildcard skip filters out every module, so the underlying tool is
    // never spawned and the command succeeds even if it isn't installed.
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml")
        .write_str("[modules]\ngo = [\".\"]\n\n[skip]\ngo-format = [\"*\"]\n")
        .unwrap();

    upkeep().args(["run", "go-format"]).current_dir(temp.path()).assert().success();
    temp.close().unwrap();
}

#[test]
fn test_run_without_modules_is_a_no_op() {
    let temp = assert_fs::TempDir::new().unwrap();

    upkeep().args(["run", "go-test"]).current_dir(temp.path()).assert().success();
    upkeep().arg("run-serial").current_dir(temp.path()).assert().success();
    upkeep().arg("run-parallel").current_dir(temp.path()).assert().success();

    temp.close().unwrap();
}

// ============================================================================
// Sync Command Tests
// ============================================================================

#[test]
fn test_sync_writes_workflow_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[modules]\ngo = [\".\"]\n").unwrap();

    upkeep()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".github/workflows"));

    temp.child(".github/workflows/upkeep-go-ci.yml")
        .assert(predicate::str::contains("Code generated by upkeep"));
    temp.child(".github/workflows/upkeep-pr.yml").assert(predicate::path::exists());
    temp.child(".github/workflows/upkeep-python-ci.yml")
        .assert(predicate::path::missing());

    temp.close().unwrap();
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[modules]\ngo = [\".\"]\n").unwrap();

    upkeep()
        .args(["sync", "--dry-run"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("write upkeep-go-ci.yml").and(predicate::str::contains(
                "skip  upkeep-python-ci.yml (ecosystem has no configured modules)",
            )),
        );

    temp.child(".github/workflows").assert(predicate::path::missing());
    temp.close().unwrap();
}

#[test]
fn test_sync_honors_explicit_workflow_skip() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml")
        .write_str("[modules]\ngo = [\".\"]\n\n[workflows]\nskip = [\"upkeep-stale\"]\n")
        .unwrap();

    upkeep().arg("sync").current_dir(temp.path()).assert().success();

    temp.child(".github/workflows/upkeep-stale.yml").assert(predicate::path::missing());
    temp.child(".github/workflows/upkeep-go-ci.yml").assert(predicate::path::exists());
    temp.close().unwrap();
}

#[test]
fn test_sync_custom_output_dir() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml")
        .write_str("[modules]\nlua = [\"lua\"]\n\n[workflows]\noutput_dir = \"ci\"\n")
        .unwrap();

    upkeep().arg("sync").current_dir(temp.path()).assert().success();

    temp.child("ci/upkeep-lua-ci.yml").assert(predicate::path::exists());
    temp.child(".github").assert(predicate::path::missing());
    temp.close().unwrap();
}

#[test]
fn test_sync_unsupported_platform_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[workflows]\nplatform = \"gitlab\"\n").unwrap();

    upkeep()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("gitlab workflows are not yet implemented"));

    temp.close().unwrap();
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_shows_effective_configuration() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[modules]\ngo = [\".\"]\n").unwrap();

    upkeep()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            // Defaults are filled in even when the file omits them.
            predicate::str::contains("platform = \"github\"")
                .and(predicate::str::contains("\"stable\"")),
        );

    temp.close().unwrap();
}

#[test]
fn test_config_output_dir_flag() {
    let temp = assert_fs::TempDir::new().unwrap();

    upkeep()
        .args(["config", "--output-dir"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".github/workflows"));

    temp.close().unwrap();
}

#[test]
fn test_broken_config_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("upkeep.toml").write_str("[modules\ngo = 3\n").unwrap();

    upkeep()
        .arg("plan")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse config"));

    temp.close().unwrap();
}

// ============================================================================
// Completions Command Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    upkeep()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upkeep"));
}
