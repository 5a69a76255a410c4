//! The fixed workflow template catalog.
//!
//! Templates are embedded at compile time and addressed by (category, name);
//! nothing is discovered from the filesystem at render time. Adding a
//! workflow means adding a file under `templates/` and an entry here.

use crate::core::Ecosystem;

/// Filename prefix for every generated workflow.
pub const FILE_PREFIX: &str = "upkeep";

/// Extension of every generated workflow file.
pub const FILE_EXT: &str = "yml";

/// Whether a template applies to every project or to one ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Rendered regardless of the module inventory.
    Generic,
    /// Rendered only when the ecosystem has configured modules.
    Ecosystem(Ecosystem),
}

/// One embedded workflow template.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub category: Category,
    pub name: &'static str,
    pub body: &'static str,
}

impl Template {
    /// Output filename for this template.
    ///
    /// The mapping is injective and stable across runs:
    /// generic templates become `upkeep-<name>.yml`, ecosystem templates
    /// `upkeep-<ecosystem>-<name>.yml`.
    pub fn file_name(&self) -> String {
        match self.category {
            Category::Generic => format!("{FILE_PREFIX}-{}.{FILE_EXT}", self.name),
            Category::Ecosystem(eco) => {
                format!("{FILE_PREFIX}-{}-{}.{FILE_EXT}", eco.name(), self.name)
            }
        }
    }

    /// Logical workflow name: the filename minus its extension. This is the
    /// key matched against the `workflows.skip` suppression list.
    pub fn workflow_name(&self) -> String {
        match self.category {
            Category::Generic => format!("{FILE_PREFIX}-{}", self.name),
            Category::Ecosystem(eco) => format!("{FILE_PREFIX}-{}-{}", eco.name(), self.name),
        }
    }
}

/// The GitHub Actions template catalog.
pub fn github_catalog() -> &'static [Template] {
    const CATALOG: &[Template] = &[
        Template {
            category: Category::Generic,
            name: "pr",
            body: include_str!("templates/github/generic/pr.yml"),
        },
        Template {
            category: Category::Generic,
            name: "release",
            body: include_str!("templates/github/generic/release.yml"),
        },
        Template {
            category: Category::Generic,
            name: "stale",
            body: include_str!("templates/github/generic/stale.yml"),
        },
        Template {
            category: Category::Generic,
            name: "sync",
            body: include_str!("templates/github/generic/sync.yml"),
        },
        Template {
            category: Category::Ecosystem(Ecosystem::Go),
            name: "ci",
            body: include_str!("templates/github/go/ci.yml"),
        },
        Template {
            category: Category::Ecosystem(Ecosystem::Python),
            name: "ci",
            body: include_str!("templates/github/python/ci.yml"),
        },
        Template {
            category: Category::Ecosystem(Ecosystem::Lua),
            name: "ci",
            body: include_str!("templates/github/lua/ci.yml"),
        },
    ];
    CATALOG
}
