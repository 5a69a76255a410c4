//! Core types and functionality for upkeep.
//!
//! This module contains the fundamental data structures used throughout the
//! application: the task catalog, configuration, the skip table, the
//! orchestration planner and the schedulers that execute its plans.

mod config;
mod diff;
mod error;
mod executor;
mod plan;
mod scheduler;
mod skip;
mod task;

pub use config::{Config, ModulesConfig, Platform, VersionsConfig, WorkflowsConfig, DEFAULT_OUTPUT_DIR};
pub use diff::{check_clean, in_ci, CI_ENV};
pub use error::{Error, Result};
pub use executor::{ShellRunner, TaskRunner};
pub use plan::{Plan, Stage, Unit};
pub use scheduler::Scheduler;
pub use skip::{SkipTable, WILDCARD};
pub use task::{Ecosystem, Task, TaskKind};
