//! File composers
//!
//! Each composer asks the fragment selectors it depends on for their fragments and
//! concatenates them, in a fixed order, into one complete artifact body. Source
//! and text files are handlebars templates rendered against a context built from
//! the fragments; structured files are serialized from typed records.

pub mod cli;
pub mod docker;
pub mod entry;
pub mod env_file;
pub mod examples;
pub mod guide;
pub mod ignore;
pub mod manifest;
pub mod tsconfig;

use crate::error::{Result, ScaffoldError};
use handlebars::Handlebars;
use serde::Serialize;

pub use cli::compose_cli_wrapper;
pub use docker::{compose_compose_file, compose_dockerfile, ComposeFile, Service};
pub use entry::compose_entry_point;
pub use env_file::compose_env_template;
pub use examples::{compose_example_collector, compose_example_index};
pub use guide::{compose_guide, guide_steps, GuideStep};
pub use ignore::compose_ignore_file;
pub use manifest::compose_manifest;
pub use tsconfig::compose_tsconfig;

/// Every file the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Manifest,
    EntryPoint,
    CompilerConfig,
    EnvTemplate,
    IgnoreFile,
    Guide,
    CliWrapper,
    ExampleCollector,
    ExampleIndex,
    Dockerfile,
    Compose,
}

impl ArtifactKind {
    /// Path relative to the project root, `/`-separated
    pub fn path(&self) -> &'static str {
        match self {
            ArtifactKind::Manifest => "package.json",
            ArtifactKind::EntryPoint => "src/index.ts",
            ArtifactKind::CompilerConfig => "tsconfig.json",
            ArtifactKind::EnvTemplate => ".env.example",
            ArtifactKind::IgnoreFile => ".gitignore",
            ArtifactKind::Guide => "README.md",
            ArtifactKind::CliWrapper => "bin/cli.js",
            ArtifactKind::ExampleCollector => "src/collectors/post-feed.ts",
            ArtifactKind::ExampleIndex => "src/collectors/index.ts",
            ArtifactKind::Dockerfile => "Dockerfile",
            ArtifactKind::Compose => "docker-compose.yml",
        }
    }
}

/// One complete output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub contents: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, contents: impl Into<String>) -> Self {
        Self {
            kind,
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &'static str {
        self.kind.path()
    }
}

/// Render `template` against `context` into an artifact of `kind`
pub(crate) fn render<T: Serialize>(kind: ArtifactKind, template: &str, context: &T) -> Result<Artifact> {
    let mut handlebars = Handlebars::new();

    // Generated code, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    let contents = handlebars
        .render_template(template, context)
        .map_err(|e| ScaffoldError::render(kind.path(), e))?;

    Ok(Artifact::new(kind, contents))
}
