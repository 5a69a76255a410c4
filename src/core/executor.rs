//! Task execution module.
//!
//! Maps each task in the catalog to its external tool invocation and runs it
//! synchronously in the module's working directory. The scheduler only ever
//! talks to the [`TaskRunner`] trait, so tests can substitute a fake.

use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

use super::error::{Error, Result};
use super::task::Task;

/// Executes one (task, module) pair and reports success or failure.
///
/// Implementations block until the underlying operation finishes; timeout
/// and cancellation are the tool's own concern.
pub trait TaskRunner: Sync {
    fn run(&self, task: Task, module: &str) -> Result<()>;
}

/// Runs tasks as external processes, inheriting the terminal's stdio.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    project_root: PathBuf,
}

impl ShellRunner {
    /// Create a runner anchored at the project root; module paths resolve
    /// relative to it.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self { project_root: project_root.into() }
    }

    /// The fixed program + arguments for a task.
    pub fn invocation(task: Task) -> (&'static str, &'static [&'static str]) {
        match task {
            Task::GoModTidy => ("go", &["mod", "tidy", "-v"]),
            Task::GoFormat => ("gofmt", &["-w", "."]),
            Task::GoLint => {
                ("golangci-lint", &["run", "--fix", "--allow-parallel-runners", "./..."])
            }
            Task::GoTest => ("go", &["test", "./..."]),
            Task::GoVulncheck => ("govulncheck", &["./..."]),
            Task::PythonSync => ("uv", &["sync", "--all-groups"]),
            Task::PythonFormat => ("uv", &["run", "ruff", "format", "."]),
            Task::PythonLint => ("uv", &["run", "ruff", "check", "--fix", "."]),
            Task::PythonMypy => ("uv", &["run", "mypy", "."]),
            Task::PythonTest => ("uv", &["run", "pytest", "-v"]),
            Task::LuaFormat => ("stylua", &["."]),
        }
    }

    /// Working directory for a module path.
    pub fn working_dir(&self, module: &str) -> PathBuf {
        self.project_root.join(module)
    }
}

impl TaskRunner for ShellRunner {
    fn run(&self, task: Task, module: &str) -> Result<()> {
        let (program, args) = Self::invocation(task);
        tracing::info!("running {task} in {module}...");

        let status = ProcessCommand::new(program)
            .args(args)
            .current_dir(self.working_dir(module))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::TaskSpawn {
                task,
                module: module.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::TaskFailed { task, module: module.to_string(), code: status.code() })
        }
    }
}

/// Run a git subcommand in `root`, capturing nothing; returns whether it
/// exited successfully.
pub(crate) fn git_succeeds(root: &Path, args: &[&str]) -> bool {
    ProcessCommand::new("git")
        .args(args)
        .current_dir(root)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
