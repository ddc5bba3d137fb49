//! Skein Scaffold - composes a runnable Skein application skeleton from a handful of choices
//!
//! Given a validated [`ProjectOptions`], the library deterministically produces every
//! file of a new TypeScript project: manifest, entry point, environment template,
//! container definitions and so on, keeping them consistent with each other for every
//! combination of options.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! - **Options** - [`ProjectOptions`], validated on construction
//! - **Fragment selectors** ([`fragments`]) - pure functions, one per axis of variation
//! - **File composers** ([`compose`]) - one per artifact, splicing fragments together
//! - **Emission driver** ([`emit`]) - gates artifacts on the options and writes them
//!   through a [`FileSink`]
//!
//! The framework version comes from a [`VersionLookup`], which degrades to a fixed
//! fallback instead of failing.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use skein_scaffold::{emit, DiskSink, Framework, PinnedVersion, ProjectOptions};
//!
//! let options = ProjectOptions::builder("demo", "./demo").build()?;
//! let framework = skein_scaffold::resolve_framework(&MyConfig, &PinnedVersion("0.4.0".into())).await;
//! emit::generate(&options, &framework, &DiskSink::new("./demo")).await?;
//! ```

pub mod compose;
pub mod emit;
pub mod error;
pub mod fragments;
pub mod options;
pub mod product;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{Artifact, ArtifactKind};
pub use emit::{generate, plan, DiskSink, FileSink};
pub use error::{ConfigError, ScaffoldError};
pub use options::{Database, OptionsFile, ProjectOptions, Storage};
pub use product::{Framework, ProductConfig};
pub use version::{resolve_framework, PinnedVersion, RegistryLookup, VersionLookup};

#[cfg(feature = "tui")]
pub use tui::run;
