//! Fragment selectors
//!
//! One pure function per axis of variation. Each maps the options (and, for
//! dependencies, the resolved framework) to a fragment that one or more composers
//! splice into an artifact. Same input, byte-identical output.

pub mod dependencies;
pub mod display;
pub mod env;
pub mod imports;
pub mod runtime;

pub use dependencies::{select_dependencies, Dependencies};
pub use display::{select_display, Display};
pub use env::{select_env_vars, EnvGroup, EnvVar, ValueKind};
pub use imports::{select_imports, Imports};
pub use runtime::{select_runtime_config, ConfigValue, DatabaseConfig, QueueConfig, RuntimeConfig, StorageConfig};
