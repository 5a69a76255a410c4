//! # Upkeep
//!
//! Skip-aware maintenance task runner and CI workflow generator for
//! multi-ecosystem repositories.
//!
//! Upkeep reads a declarative project description (`upkeep.toml`) — which
//! ecosystems are present, which checks to skip, which versions to test
//! against — and turns it into two things:
//!
//! - an ordered/parallel execution plan of maintenance tasks (format, lint,
//!   test, vulnerability scan) across Go, Python and Lua modules, and
//! - a set of CI workflow files rendered from an embedded template catalog,
//!   with per-workflow and per-target skip semantics.
//!
//! Mutating tasks (formatters, auto-fixers) run strictly in order per
//! ecosystem; verifying tasks (tests, static checks) run concurrently across
//! ecosystems with all failures collected.
//!
//! ## Quick Start
//!
//! ```bash
//! # Scaffold a config
//! upkeep init
//!
//! # Run everything: mutating tasks, then verification, then a clean-tree check
//! upkeep all
//!
//! # Regenerate CI workflows
//! upkeep sync
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod core;
pub mod init;
pub mod workflows;

// Re-export commonly used types
pub use crate::core::{Config, Ecosystem, Plan, Scheduler, ShellRunner, SkipTable, Task, TaskRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "upkeep";
