//! Orchestration planner.
//!
//! Turns the module inventory into an ordered list of execution stages. The
//! plan is pure data: building it runs nothing, and the same configuration
//! always yields the same plan.

use std::fmt;

use serde::Serialize;

use super::config::Config;
use super::task::{Ecosystem, Task, TaskKind};

/// One schedulable piece of work: a task applied to every (non-skipped)
/// module of its ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub task: Task,
}

impl Unit {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    /// The ecosystem this unit operates on, used for logging.
    pub fn ecosystem(self) -> Ecosystem {
        self.task.ecosystem()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ecosystem(), self.task)
    }
}

/// A group of units plus the execution discipline they require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Run strictly in order, stopping at the first failure.
    Sequential(Vec<Unit>),
    /// Launch all units, wait for all of them, collect every failure.
    Concurrent(Vec<Unit>),
}

impl Stage {
    pub fn units(&self) -> &[Unit] {
        match self {
            Stage::Sequential(units) | Stage::Concurrent(units) => units,
        }
    }
}

/// An ordered set of stages produced for one configuration.
///
/// Mutating work comes first, one sequential stage per configured ecosystem
/// in declaration order; read-only verification follows as a single
/// concurrent stage. Ecosystems without modules contribute nothing at all —
/// not even an empty stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub stages: Vec<Stage>,
}

impl Plan {
    /// Build the full plan: mutating stages followed by the verifying stage.
    pub fn build(config: &Config) -> Self {
        let mut plan = Self::mutating(config);
        plan.stages.extend(Self::verifying(config).stages);
        plan
    }

    /// Build only the mutating half of the plan.
    ///
    /// Formatters and auto-fixers are order-sensitive within an ecosystem, so
    /// each ecosystem gets its own sequential stage; the stages themselves
    /// run in ecosystem declaration order.
    pub fn mutating(config: &Config) -> Self {
        let stages = config
            .configured_ecosystems()
            .into_iter()
            .map(|eco| {
                Stage::Sequential(eco.mutating_tasks().iter().copied().map(Unit::new).collect())
            })
            .collect();
        Self { stages }
    }

    /// Build only the verifying half of the plan: a single concurrent stage
    /// with one unit per (configured ecosystem, verifying task) pair.
    pub fn verifying(config: &Config) -> Self {
        let units: Vec<Unit> = config
            .configured_ecosystems()
            .into_iter()
            .flat_map(|eco| eco.verifying_tasks().iter().copied().map(Unit::new))
            .collect();
        if units.is_empty() {
            Self { stages: Vec::new() }
        } else {
            Self { stages: vec![Stage::Concurrent(units)] }
        }
    }

    /// All units across all stages, in schedule order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.stages.iter().flat_map(|stage| stage.units().iter())
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stages.is_empty() {
            return writeln!(f, "(empty plan: no ecosystems configured)");
        }
        for (i, stage) in self.stages.iter().enumerate() {
            let (label, units) = match stage {
                Stage::Sequential(units) => ("sequential", units),
                Stage::Concurrent(units) => ("concurrent", units),
            };
            writeln!(f, "stage {} ({label}):", i + 1)?;
            for unit in units {
                writeln!(f, "  {} [{}]", unit.task, kind_label(unit.task.kind()))?;
            }
        }
        Ok(())
    }
}

fn kind_label(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Mutating => "mutating",
        TaskKind::Verifying => "verifying",
    }
}
