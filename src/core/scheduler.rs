//! Plan execution.
//!
//! Provides the two scheduling primitives the planner's stages require:
//! strictly sequential execution with stop-on-first-error, and concurrent
//! execution that lets every unit finish and aggregates all failures. They
//! are deliberately separate functions, not one function with a flag: the
//! asymmetry between order-sensitive mutating work and independent
//! verification is the whole point.

use std::sync::mpsc;
use std::thread;

use super::config::Config;
use super::error::{Error, Result};
use super::executor::TaskRunner;
use super::plan::{Plan, Stage, Unit};

/// Executes plans against a [`TaskRunner`].
pub struct Scheduler<'a, R: TaskRunner> {
    config: &'a Config,
    runner: &'a R,
}

impl<'a, R: TaskRunner> Scheduler<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Execute one unit: iterate its ecosystem's modules in declaration
    /// order, skip-filter each, and stop at the first failing module.
    pub fn run_unit(&self, unit: Unit) -> Result<()> {
        for module in self.config.modules(unit.ecosystem()) {
            if self.config.skip.should_skip(unit.task, module) {
                tracing::debug!("skipping {} for module {module}", unit.task);
                continue;
            }
            self.runner.run(unit.task, module)?;
        }
        Ok(())
    }

    /// Run units strictly in order, stopping at the first failure.
    pub fn run_sequential(&self, units: &[Unit]) -> Result<()> {
        for unit in units {
            self.run_unit(*unit)?;
        }
        Ok(())
    }

    /// Run all units concurrently, wait for every one, and report every
    /// failure. One failing unit never short-circuits the others.
    pub fn run_concurrent(&self, units: &[Unit]) -> Result<()> {
        if units.is_empty() {
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            for unit in units {
                let tx = tx.clone();
                scope.spawn(move || {
                    if let Err(err) = self.run_unit(*unit) {
                        // The receiver outlives the scope; a send can only
                        // fail if the main thread panicked.
                        let _ = tx.send(err);
                    }
                });
            }
        });
        drop(tx);

        let mut failures: Vec<Error> = rx.into_iter().collect();
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(Error::Aggregate(failures)),
        }
    }

    /// Execute a whole plan, stage by stage.
    ///
    /// Sequential stages stop the run at their first failure, so a mutating
    /// failure in an earlier ecosystem prevents both later ecosystems'
    /// mutating stages and the verifying stage from starting.
    pub fn run_plan(&self, plan: &Plan) -> Result<()> {
        for stage in &plan.stages {
            match stage {
                Stage::Sequential(units) => self.run_sequential(units)?,
                Stage::Concurrent(units) => self.run_concurrent(units)?,
            }
        }
        Ok(())
    }
}
