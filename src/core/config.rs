//! Configuration management for upkeep.
//!
//! Handles loading `upkeep.toml` and applying defaults. The loaded value is
//! threaded explicitly into the planner, scheduler and renderer; there is no
//! process-wide configuration state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::skip::SkipTable;
use super::task::Ecosystem;

/// Default location for generated GitHub workflows.
pub const DEFAULT_OUTPUT_DIR: &str = ".github/workflows";

/// CI/CD platform to generate workflows for.
///
/// Unrecognized values fail at config parse time; recognized-but-unbuilt
/// platforms fail when rendering is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Github,
    Gitlab,
    Codeberg,
}

impl Platform {
    /// Stable lowercase platform name.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Github => "github",
            Platform::Gitlab => "gitlab",
            Platform::Codeberg => "codeberg",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Project configuration: module inventory, version matrices, workflow
/// generation options and the skip table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module inventory per ecosystem
    pub modules: ModulesConfig,

    /// Toolchain/runtime version matrices for CI
    pub versions: VersionsConfig,

    /// Workflow generation settings
    pub workflows: WorkflowsConfig,

    /// Per-target skip table
    pub skip: SkipTable,
}

/// Module paths per ecosystem, relative to the project root.
///
/// An empty list means the ecosystem is not configured: no tasks run for it
/// and no ecosystem-specific workflow files are generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Go module paths, e.g. `[".", "subdir/mylib"]`
    pub go: Vec<String>,

    /// Python package paths, e.g. `["python", "tools/cli"]`
    pub python: Vec<String>,

    /// Lua source paths, e.g. `["lua/plugin"]`
    pub lua: Vec<String>,
}

/// Version matrices used by the generated CI workflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Go toolchain versions (default: `["stable"]`)
    pub go: Vec<String>,

    /// Python versions (default: `["3.14"]`)
    pub python: Vec<String>,

    /// Runner OS images (default: `["ubuntu-latest"]`)
    pub os: Vec<String>,
}

/// Workflow generation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowsConfig {
    /// Platform to generate for (default: github)
    pub platform: Platform,

    /// Output directory for generated workflow files
    /// (default: `.github/workflows`)
    pub output_dir: Option<PathBuf>,

    /// Workflow names to suppress entirely, by logical name
    /// (filename minus extension), e.g. `["upkeep-stale"]`
    pub skip: Vec<String>,
}

impl Config {
    /// Load configuration for a project root.
    ///
    /// Looks for config in:
    /// 1. `upkeep.toml` in the project root
    /// 2. `~/.config/upkeep/config.toml`
    /// 3. Falls back to defaults
    ///
    /// Defaults are applied in every case.
    pub fn load(project_root: &Path) -> Result<Self> {
        let local_config = project_root.join("upkeep.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let global_config = config_dir.join("upkeep").join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default().with_defaults())
    }

    /// Load configuration from a specific file, applying defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|source| Error::Config { path: path.to_path_buf(), source })?;
        Ok(config.with_defaults())
    }

    /// Return a copy with default values filled in.
    ///
    /// Idempotent: applying it twice is the same as applying it once.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.versions.go.is_empty() {
            self.versions.go = vec!["stable".to_string()];
        }
        if self.versions.python.is_empty() {
            self.versions.python = vec!["3.14".to_string()];
        }
        if self.versions.os.is_empty() {
            self.versions.os = vec!["ubuntu-latest".to_string()];
        }
        if self.workflows.output_dir.is_none() {
            self.workflows.output_dir = Some(PathBuf::from(DEFAULT_OUTPUT_DIR));
        }
        self
    }

    /// Module paths for an ecosystem, in declaration order.
    pub fn modules(&self, ecosystem: Ecosystem) -> &[String] {
        match ecosystem {
            Ecosystem::Go => &self.modules.go,
            Ecosystem::Python => &self.modules.python,
            Ecosystem::Lua => &self.modules.lua,
        }
    }

    /// True if the ecosystem has at least one configured module.
    pub fn has_ecosystem(&self, ecosystem: Ecosystem) -> bool {
        !self.modules(ecosystem).is_empty()
    }

    /// Ecosystems with configured modules, in stable declaration order.
    pub fn configured_ecosystems(&self) -> Vec<Ecosystem> {
        Ecosystem::ALL.into_iter().filter(|eco| self.has_ecosystem(*eco)).collect()
    }

    /// Effective workflow output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.workflows.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}
