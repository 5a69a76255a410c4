//! Task and ecosystem catalog.
//!
//! Defines the closed set of maintenance tasks `upkeep` knows how to run,
//! grouped by language ecosystem and split into mutating and verifying
//! categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::Error;

/// A language/tooling family with its own task set and workflow templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Go,
    Python,
    Lua,
}

impl Ecosystem {
    /// All ecosystems, in declaration order.
    ///
    /// This order is load-bearing: mutating stages are scheduled in it, and
    /// it must stay stable across runs.
    pub const ALL: [Ecosystem; 3] = [Ecosystem::Go, Ecosystem::Python, Ecosystem::Lua];

    /// Stable lowercase name used in filenames and template categories.
    pub fn name(self) -> &'static str {
        match self {
            Ecosystem::Go => "go",
            Ecosystem::Python => "python",
            Ecosystem::Lua => "lua",
        }
    }

    /// Mutating tasks in their fixed execution order.
    ///
    /// Later tasks may depend on earlier ones having normalized the source
    /// tree, so this order must never change at runtime.
    pub fn mutating_tasks(self) -> &'static [Task] {
        match self {
            Ecosystem::Go => &[Task::GoModTidy, Task::GoFormat, Task::GoLint],
            Ecosystem::Python => &[Task::PythonSync, Task::PythonFormat, Task::PythonLint],
            Ecosystem::Lua => &[Task::LuaFormat],
        }
    }

    /// Verifying (read-only) tasks, safe to run concurrently.
    pub fn verifying_tasks(self) -> &'static [Task] {
        match self {
            Ecosystem::Go => &[Task::GoTest, Task::GoVulncheck],
            Ecosystem::Python => &[Task::PythonMypy, Task::PythonTest],
            Ecosystem::Lua => &[],
        }
    }

    /// All tasks belonging to this ecosystem, mutating first.
    pub fn tasks(self) -> impl Iterator<Item = Task> {
        self.mutating_tasks().iter().chain(self.verifying_tasks()).copied()
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a task changes files on disk or only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Changes files on disk; must run in isolation, in a fixed order.
    Mutating,
    /// Read-only check; safe to run concurrently with other verifying tasks.
    Verifying,
}

/// One maintenance operation scoped to a single ecosystem.
///
/// The set is closed on purpose: unknown target names are rejected when
/// parsed, and the planner can enumerate the catalog exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    GoModTidy,
    GoFormat,
    GoLint,
    GoTest,
    GoVulncheck,
    PythonSync,
    PythonFormat,
    PythonLint,
    PythonMypy,
    PythonTest,
    LuaFormat,
}

impl Task {
    /// Every task in the catalog, grouped by ecosystem.
    pub const ALL: [Task; 11] = [
        Task::GoModTidy,
        Task::GoFormat,
        Task::GoLint,
        Task::GoTest,
        Task::GoVulncheck,
        Task::PythonSync,
        Task::PythonFormat,
        Task::PythonLint,
        Task::PythonMypy,
        Task::PythonTest,
        Task::LuaFormat,
    ];

    /// Kebab-case target name, as used on the command line and in the
    /// `[skip]` config table.
    pub fn name(self) -> &'static str {
        match self {
            Task::GoModTidy => "go-mod-tidy",
            Task::GoFormat => "go-format",
            Task::GoLint => "go-lint",
            Task::GoTest => "go-test",
            Task::GoVulncheck => "go-vulncheck",
            Task::PythonSync => "python-sync",
            Task::PythonFormat => "python-format",
            Task::PythonLint => "python-lint",
            Task::PythonMypy => "python-mypy",
            Task::PythonTest => "python-test",
            Task::LuaFormat => "lua-format",
        }
    }

    /// The ecosystem this task belongs to.
    pub fn ecosystem(self) -> Ecosystem {
        match self {
            Task::GoModTidy | Task::GoFormat | Task::GoLint | Task::GoTest | Task::GoVulncheck => {
                Ecosystem::Go
            }
            Task::PythonSync
            | Task::PythonFormat
            | Task::PythonLint
            | Task::PythonMypy
            | Task::PythonTest => Ecosystem::Python,
            Task::LuaFormat => Ecosystem::Lua,
        }
    }

    /// Whether this task mutates the working tree.
    pub fn kind(self) -> TaskKind {
        match self {
            Task::GoModTidy
            | Task::GoFormat
            | Task::GoLint
            | Task::PythonSync
            | Task::PythonFormat
            | Task::PythonLint
            | Task::LuaFormat => TaskKind::Mutating,
            Task::GoTest | Task::GoVulncheck | Task::PythonMypy | Task::PythonTest => {
                TaskKind::Verifying
            }
        }
    }

    /// Short human description for `upkeep list`.
    pub fn description(self) -> &'static str {
        match self {
            Task::GoModTidy => "tidy go.mod/go.sum",
            Task::GoFormat => "apply gofmt",
            Task::GoLint => "run golangci-lint with fixes",
            Task::GoTest => "run go test",
            Task::GoVulncheck => "run govulncheck",
            Task::PythonSync => "sync the uv environment",
            Task::PythonFormat => "apply ruff format",
            Task::PythonLint => "run ruff check with fixes",
            Task::PythonMypy => "run mypy",
            Task::PythonTest => "run pytest",
            Task::LuaFormat => "apply stylua",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Task::ALL
            .into_iter()
            .find(|task| task.name() == lower)
            .ok_or_else(|| Error::UnknownTarget(s.to_string()))
    }
}
