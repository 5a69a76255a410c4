//! Clean working tree check.
//!
//! After the maintenance tasks have run, a dirty tree means a formatter or
//! fixer produced changes that were never committed. Interactively that is
//! only worth a warning; in CI it is a failure.

use std::path::Path;
use std::process::{Command as ProcessCommand, Stdio};

use super::error::{Error, Result};
use super::executor::git_succeeds;

/// Environment variable that marks a CI context.
pub const CI_ENV: &str = "CI";

/// Fail (in CI) or warn (elsewhere) if the working tree has uncommitted
/// changes, staged or unstaged.
pub fn check_clean(project_root: &Path) -> Result<()> {
    let clean = git_succeeds(project_root, &["diff", "--exit-code"])
        && git_succeeds(project_root, &["diff", "--cached", "--exit-code"]);
    if clean {
        return Ok(());
    }

    if !in_ci() {
        tracing::warn!("uncommitted changes detected");
        return Ok(());
    }

    // Show the offending diff before failing the run.
    let _ = ProcessCommand::new("git")
        .arg("diff")
        .current_dir(project_root)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    Err(Error::DirtyTree)
}

/// True when running under a CI system (non-empty `CI` variable).
pub fn in_ci() -> bool {
    std::env::var(CI_ENV).map(|value| !value.is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_in_ci_reflects_environment() {
        std::env::remove_var(CI_ENV);
        assert!(!in_ci());

        std::env::set_var(CI_ENV, "true");
        assert!(in_ci());

        std::env::set_var(CI_ENV, "");
        assert!(!in_ci());

        std::env::remove_var(CI_ENV);
    }

    #[test]
    #[serial]
    fn test_dirty_tree_warns_outside_ci() {
        std::env::remove_var(CI_ENV);

        // A fresh repo with an uncommitted file is dirty once staged.
        let dir = tempfile::tempdir().unwrap();
        let run = |args: &[&str]| {
            std::process::Command::new("git")
                .args(args)
                .current_dir(dir.path())
                .output()
                .unwrap()
        };
        run(&["init", "-q"]);
        std::fs::write(dir.path().join("file.txt"), "contents\n").unwrap();
        run(&["add", "file.txt"]);

        // Outside CI this is a warning, not an error.
        check_clean(dir.path()).unwrap();
    }

    #[test]
    #[serial]
    fn test_clean_tree_is_ok_in_ci() {
        std::env::set_var(CI_ENV, "true");

        let dir = tempfile::tempdir().unwrap();
        let run = |args: &[&str]| {
            std::process::Command::new("git")
                .args(args)
                .current_dir(dir.path())
                .output()
                .unwrap()
        };
        run(&["init", "-q"]);

        let result = check_clean(dir.path());
        std::env::remove_var(CI_ENV);
        result.unwrap();
    }
}
