//! create-skein - Project scaffolding for Skein collector applications

use anyhow::Result;
use clap::{ArgAction, Parser};
use skein_scaffold::tui::CreateArgs;
use skein_scaffold::{Database, ProductConfig, Storage};
use std::path::PathBuf;

/// Skein product configuration
#[derive(Clone)]
pub struct SkeinConfig;

impl ProductConfig for SkeinConfig {
    fn name(&self) -> &'static str {
        "create-skein"
    }

    fn display_name(&self) -> &'static str {
        "Skein"
    }

    fn framework_package(&self) -> &'static str {
        "@skein/core"
    }

    fn cli_tool(&self) -> &'static str {
        "skein"
    }

    fn fallback_version(&self) -> &'static str {
        "0.4.0"
    }

    fn registry_url_env(&self) -> &'static str {
        "SKEIN_NPM_REGISTRY"
    }

    fn docs_url(&self) -> &'static str {
        "https://skein.dev/docs"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Skein collector applications"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-skein")]
#[command(about = "CLI for scaffolding Skein collector applications")]
#[command(version)]
pub struct Args {
    /// Project name (lowercase letters, digits, hyphens, underscores)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project directory to create (defaults to ./<name>)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Database engine
    #[arg(long, value_enum)]
    pub database: Option<Database>,

    /// File storage backend
    #[arg(long, value_enum)]
    pub storage: Option<Storage>,

    /// Directory for local storage (default ./uploads)
    #[arg(long = "storage-path")]
    pub storage_path: Option<String>,

    /// Use Redis for the job queue
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub redis: Option<bool>,

    /// Add Dockerfile and docker-compose.yml
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub docker: Option<bool>,

    /// Include the example collector
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub examples: Option<bool>,

    /// YAML answers file to use instead of prompting
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Skip the registry lookup and pin the fallback framework version
    #[arg(long)]
    pub offline: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn into_create_args(self, config: &SkeinConfig) -> CreateArgs {
        CreateArgs {
            name: self.name,
            directory: self.directory,
            database: self.database,
            storage: self.storage,
            storage_path: self.storage_path,
            redis: self.redis,
            docker: self.docker,
            examples: self.examples,
            answers: self.answers,
            registry_url: std::env::var(config.registry_url_env()).ok(),
            offline: self.offline,
            yes: self.yes,
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logger(args.verbose);
    log::debug!("{:?}", args);

    let config = SkeinConfig;
    let result = skein_scaffold::run(&config, args.into_create_args(&config)).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "create-skein",
            "--name",
            "shop",
            "--database",
            "postgresql",
            "--storage",
            "s3",
            "--redis",
            "--docker=false",
            "--yes",
        ]);
        assert_eq!(args.name.as_deref(), Some("shop"));
        assert_eq!(args.database, Some(Database::Postgresql));
        assert_eq!(args.storage, Some(Storage::ObjectStorage));
        assert_eq!(args.redis, Some(true));
        assert_eq!(args.docker, Some(false));
        assert_eq!(args.examples, None);
        assert!(args.yes);
    }

    #[test]
    fn test_postgres_alias() {
        let args = Args::parse_from(["create-skein", "--database", "postgres"]);
        assert_eq!(args.database, Some(Database::Postgresql));
    }

    #[test]
    fn test_unknown_database_rejected() {
        assert!(Args::try_parse_from(["create-skein", "--database", "mysql"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
