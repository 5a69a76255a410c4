//! Project scaffolding for `upkeep init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Name of the project-local configuration file.
pub const CONFIG_FILE: &str = "upkeep.toml";

/// Starter configuration template.
const CONFIG_TEMPLATE: &str = r#"# upkeep configuration
# Declare which ecosystems this repository contains; empty lists mean
# "not configured" and disable all tasks and workflows for that ecosystem.

[modules]
go = ["."]
python = []
lua = []

[versions]
# go = ["stable"]
# python = ["3.14"]
# os = ["ubuntu-latest"]

[workflows]
platform = "github"
# output_dir = ".github/workflows"
# Workflow names (filename minus extension) to suppress entirely:
# skip = ["upkeep-stale"]

# Per-target skips. "*" skips a target for every module.
[skip]
# go-vulncheck = ["*"]
# python-mypy = ["tools/legacy"]
"#;

/// Write a starter `upkeep.toml` into `dir`.
///
/// Refuses to overwrite an existing config unless `force` is set.
pub fn scaffold(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}
