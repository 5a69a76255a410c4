//! Upkeep - skip-aware maintenance task runner and CI workflow generator.
//!
//! Runs format/lint/test/vulnerability-scan tasks across the ecosystems a
//! repository declares, and regenerates the repository's CI workflow files
//! from an embedded template catalog.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use upkeep::core::{check_clean, Config, Plan, Scheduler, ShellRunner, Stage, Task, TaskKind, Unit};
use upkeep::workflows::Renderer;

/// Skip-aware maintenance task runner and CI workflow generator
#[derive(Parser)]
#[command(name = "upkeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the configuration file (default: ./upkeep.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single target by name (e.g. go-format, python-test)
    Run {
        /// Target name
        target: String,
    },

    /// Run all mutating targets (formatters, fixers) strictly in order
    RunSerial,

    /// Run all verifying targets (tests, checks) concurrently
    RunParallel,

    /// Run everything: mutating, then verifying, then a clean-tree check
    All,

    /// Show the execution plan without running anything
    Plan,

    /// List all targets in the catalog
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate CI workflow files from the configuration
    Sync {
        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Scaffold an upkeep.toml in the current directory
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing upkeep.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Config {
        /// Show only the resolved output directory
        #[arg(long)]
        output_dir: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    let project_root = PathBuf::from(".");

    match cli.command {
        Commands::Run { target } => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_run(&config, &project_root, &target)?;
        }
        Commands::RunSerial => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_plan_half(&config, &project_root, Plan::mutating(&config))?;
        }
        Commands::RunParallel => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_plan_half(&config, &project_root, Plan::verifying(&config))?;
        }
        Commands::All => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_all(&config, &project_root)?;
        }
        Commands::Plan => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_show_plan(&config);
        }
        Commands::List { format } => {
            cmd_list(&format)?;
        }
        Commands::Sync { dry_run } => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            cmd_sync(&config, dry_run)?;
        }
        Commands::Init { path, force } => {
            let written = upkeep::init::scaffold(&path, force)?;
            println!("Initialized {}", written.display());
            println!("Edit it to declare your modules, then run: upkeep sync");
        }
        Commands::Config { output_dir } => {
            let config = load_config(&project_root, cli.config.as_deref())?;
            if output_dir {
                println!("{}", config.output_dir().display());
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

fn load_config(project_root: &Path, override_path: Option<&Path>) -> Result<Config> {
    let config = match override_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(project_root)?,
    };
    Ok(config)
}

/// Run one target across its ecosystem's configured modules.
fn cmd_run(config: &Config, project_root: &Path, target: &str) -> Result<()> {
    let task: Task = target.parse()?;
    let runner = ShellRunner::new(project_root);
    Scheduler::new(config, &runner).run_unit(Unit::new(task))?;
    Ok(())
}

/// Run a pre-built half of the plan (mutating or verifying).
fn cmd_plan_half(config: &Config, project_root: &Path, plan: Plan) -> Result<()> {
    if plan.is_empty() {
        tracing::warn!("nothing to do: no ecosystems configured");
        return Ok(());
    }
    let runner = ShellRunner::new(project_root);
    Scheduler::new(config, &runner).run_plan(&plan)?;
    Ok(())
}

/// Run the full plan, then verify the tree is clean.
fn cmd_all(config: &Config, project_root: &Path) -> Result<()> {
    cmd_plan_half(config, project_root, Plan::build(config))?;
    check_clean(project_root)?;
    Ok(())
}

/// Print the plan with per-module skip decisions; nothing is executed.
fn cmd_show_plan(config: &Config) {
    let plan = Plan::build(config);
    if plan.is_empty() {
        println!("(empty plan: no ecosystems configured)");
        return;
    }
    for (i, stage) in plan.stages.iter().enumerate() {
        let (label, units) = match stage {
            Stage::Sequential(units) => ("sequential", units),
            Stage::Concurrent(units) => ("concurrent", units),
        };
        println!("stage {} ({label}):", i + 1);
        for unit in units {
            let kind = match unit.task.kind() {
                TaskKind::Mutating => "mutating",
                TaskKind::Verifying => "verifying",
            };
            println!("  {} [{kind}]:", unit.task);
            for module in config.modules(unit.ecosystem()) {
                if config.skip.should_skip(unit.task, module) {
                    println!("    {module} (skipped)");
                } else {
                    println!("    {module}");
                }
            }
        }
    }
}

fn cmd_list(format: &str) -> Result<()> {
    match format {
        "json" => {
            let targets: Vec<serde_json::Value> = Task::ALL
                .into_iter()
                .map(|task| {
                    serde_json::json!({
                        "name": task.name(),
                        "ecosystem": task.ecosystem().name(),
                        "kind": task.kind(),
                        "description": task.description(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&targets)?);
        }
        _ => {
            for task in Task::ALL {
                println!("{:<16} {:<9} {}", task.name(), task.ecosystem().name(), task.description());
            }
        }
    }
    Ok(())
}

fn cmd_sync(config: &Config, dry_run: bool) -> Result<()> {
    let renderer = Renderer::new(config);
    if dry_run {
        for job in renderer.jobs()? {
            match job.suppressed {
                Some(suppression) => {
                    println!("skip  {} ({})", job.file_name(), suppression.reason());
                }
                None => println!("write {}", job.file_name()),
            }
        }
        return Ok(());
    }

    let written = renderer.sync()?;
    println!("Generated {} workflow file(s) in {}", written.len(), config.output_dir().display());
    Ok(())
}
