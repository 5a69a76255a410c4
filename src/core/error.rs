//! Error types for the upkeep library.

use std::path::PathBuf;

use thiserror::Error;

use super::task::Task;

/// Convenience result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by planning, execution and workflow rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller asked for a target name outside the fixed catalog.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The configured platform parses but has no renderer yet.
    #[error("{0} workflows are not yet implemented")]
    UnsupportedPlatform(String),

    /// A tool invocation ran and exited non-zero.
    #[error("{task} failed for module {module}{}", exit_suffix(.code))]
    TaskFailed { task: Task, module: String, code: Option<i32> },

    /// A tool invocation could not be started at all.
    #[error("failed to start {task} for module {module}: {source}")]
    TaskSpawn {
        task: Task,
        module: String,
        #[source]
        source: std::io::Error,
    },

    /// Multiple concurrent units failed; every failure is retained.
    #[error("{}", aggregate_message(.0))]
    Aggregate(Vec<Error>),

    /// A workflow template failed to parse or render.
    #[error("render workflow template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// A configuration file exists but cannot be parsed.
    #[error("parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Uncommitted changes detected while running in CI.
    #[error("uncommitted changes detected")]
    DirtyTree,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => String::new(),
    }
}

fn aggregate_message(failures: &[Error]) -> String {
    let mut message = format!("{} task(s) failed:", failures.len());
    for failure in failures {
        message.push_str("\n  - ");
        message.push_str(&failure.to_string());
    }
    message
}
