//! CI workflow generation.
//!
//! A fixed catalog of embedded templates is rendered against the module
//! inventory and written into the configured output directory, with two
//! independent suppression rules: explicit skip-by-name and ecosystem
//! absence.

mod catalog;
mod render;

pub use catalog::{github_catalog, Category, Template, FILE_EXT, FILE_PREFIX};
pub use render::{sync, RenderJob, Renderer, Suppression, GENERATED_BY};
