//! Skip table: which (task, module) pairs are excluded from execution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Wildcard entry that skips a task for every module, including modules
/// configured after the table was built.
pub const WILDCARD: &str = "*";

/// Maps a target name to the modules it is skipped for.
///
/// Keys are kebab-case target names (`"go-test"`); values are module paths or
/// the [`WILDCARD`] marker. Matching is exact, never prefix-based. A task
/// absent from the table is never skipped.
///
/// In `upkeep.toml`:
///
/// ```toml
/// [skip]
/// go-test = ["*"]
/// python-lint = ["tools/legacy"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkipTable(BTreeMap<String, Vec<String>>);

impl SkipTable {
    /// Create an empty table (nothing skipped).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record modules to skip for a target.
    pub fn insert(&mut self, task: Task, modules: Vec<String>) {
        self.0.insert(task.name().to_string(), modules);
    }

    /// True if `task` should be skipped for `module`.
    pub fn should_skip(&self, task: Task, module: &str) -> bool {
        match self.0.get(task.name()) {
            Some(modules) => modules.iter().any(|m| m == WILDCARD || m == module),
            None => false,
        }
    }

    /// True iff `modules` is non-empty and every module is individually
    /// skipped for `task`.
    ///
    /// An empty module list is *not* fully skipped: "no modules configured"
    /// and "all modules explicitly skipped" are different states. Ecosystem
    /// absence is handled separately by the workflow renderer.
    pub fn is_fully_skipped(&self, task: Task, modules: &[String]) -> bool {
        !modules.is_empty() && modules.iter().all(|m| self.should_skip(task, m))
    }

    /// True if the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
