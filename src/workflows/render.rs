//! Workflow rendering engine.
//!
//! Renders the embedded template catalog against the module inventory and
//! writes the results into the configured output directory. Regeneration is
//! additive: files are overwritten in place and unrelated files in the
//! output directory are left alone.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use tera::Tera;

use super::catalog::{github_catalog, Category, Template};
use crate::core::{Config, Ecosystem, Error, Platform, Result};

/// Marker written into every generated file's header.
pub const GENERATED_BY: &str = "upkeep";

/// Why a render job was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// The workflow name appears in the `workflows.skip` list.
    Explicit,
    /// The template's ecosystem has no configured modules.
    EcosystemAbsent,
}

impl Suppression {
    pub fn reason(self) -> &'static str {
        match self {
            Suppression::Explicit => "listed in workflows.skip",
            Suppression::EcosystemAbsent => "ecosystem has no configured modules",
        }
    }
}

/// One candidate output file, annotated with its suppression decision.
///
/// Jobs are rebuilt from scratch on every invocation and discarded after the
/// write decision; nothing is persisted between runs.
#[derive(Debug, Clone, Copy)]
pub struct RenderJob {
    pub template: &'static Template,
    pub suppressed: Option<Suppression>,
}

impl RenderJob {
    pub fn file_name(&self) -> String {
        self.template.file_name()
    }
}

/// Renders the workflow catalog for one configuration.
pub struct Renderer<'a> {
    config: &'a Config,
    timestamp: Option<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, timestamp: None }
    }

    /// Freeze the timestamp written into generated headers. Used by
    /// `upkeep sync` callers that need byte-identical regeneration.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Compute every render job with its suppression decision, without
    /// touching the filesystem.
    ///
    /// Explicit suppression is checked before ecosystem absence, and the two
    /// rules are independent: a configured ecosystem whose tasks are all
    /// skipped is *not* suppressed — it still gets a (degenerate) file.
    pub fn jobs(&self) -> Result<Vec<RenderJob>> {
        let catalog = self.catalog()?;
        Ok(catalog
            .iter()
            .map(|template| RenderJob { template, suppressed: self.suppression(template) })
            .collect())
    }

    /// Render all non-suppressed jobs and write them under the configured
    /// output directory, creating it if necessary. Returns the written
    /// paths. Existing files with other names are never deleted.
    pub fn sync(&self) -> Result<Vec<PathBuf>> {
        let jobs = self.jobs()?;
        let output_dir = self.config.output_dir();
        let context = self.context();

        let mut written = Vec::new();
        for job in jobs {
            if let Some(suppression) = job.suppressed {
                tracing::debug!("suppressing {}: {}", job.file_name(), suppression.reason());
                continue;
            }

            let rendered = render_template(job.template, &context)?;
            std::fs::create_dir_all(&output_dir)?;
            let path = output_dir.join(job.file_name());
            std::fs::write(&path, rendered)?;
            tracing::info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn catalog(&self) -> Result<&'static [Template]> {
        match self.config.workflows.platform {
            Platform::Github => Ok(github_catalog()),
            other => Err(Error::UnsupportedPlatform(other.name().to_string())),
        }
    }

    fn suppression(&self, template: &Template) -> Option<Suppression> {
        if self.config.workflows.skip.contains(&template.workflow_name()) {
            return Some(Suppression::Explicit);
        }
        if let Category::Ecosystem(eco) = template.category {
            if !self.config.has_ecosystem(eco) {
                return Some(Suppression::EcosystemAbsent);
            }
        }
        None
    }

    /// The template data: inventory, version matrices, and one fully-skipped
    /// flag per task (`skip.go_test` etc). Per-module skip decisions stay in
    /// the runtime, not in the generated files.
    fn context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("generated_by", GENERATED_BY);
        context.insert("timestamp", &self.effective_timestamp());

        let mut modules = BTreeMap::new();
        let mut skip = BTreeMap::new();
        for eco in Ecosystem::ALL {
            let eco_modules = self.config.modules(eco);
            modules.insert(eco.name(), eco_modules);
            for task in eco.tasks() {
                skip.insert(
                    task.name().replace('-', "_"),
                    self.config.skip.is_fully_skipped(task, eco_modules),
                );
            }
        }
        context.insert("modules", &modules);
        context.insert("skip", &skip);

        let mut versions = BTreeMap::new();
        versions.insert("go", &self.config.versions.go);
        versions.insert("python", &self.config.versions.python);
        versions.insert("os", &self.config.versions.os);
        context.insert("versions", &versions);

        context
    }

    fn effective_timestamp(&self) -> String {
        self.timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

fn render_template(template: &Template, context: &tera::Context) -> Result<String> {
    let name = template.file_name();
    let mut tera = Tera::default();
    tera.add_raw_template(&name, template.body)
        .map_err(|source| Error::Render { name: name.clone(), source })?;
    tera.render(&name, context).map_err(|source| Error::Render { name, source })
}

/// Render and write workflows for a configuration.
pub fn sync(config: &Config) -> Result<Vec<PathBuf>> {
    Renderer::new(config).sync()
}
