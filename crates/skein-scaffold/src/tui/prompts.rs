//! Charm-style CLI prompts using cliclack

use crate::compose::guide_steps;
use crate::emit::{self, DiskSink};
use crate::options::{
    validate_project_name, Database, OptionsFile, ProjectOptions, Storage,
    DEFAULT_LOCAL_STORAGE_PATH,
};
use crate::product::{Framework, ProductConfig};
use crate::version::{resolve_framework, PinnedVersion, RegistryLookup};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use url::Url;

/// Project name used when `--yes` is given without `--name`
const DEFAULT_PROJECT_NAME: &str = "skein-app";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project (and package) name
    pub name: Option<String>,

    /// Project directory to create; defaults to `./<name>`
    pub directory: Option<PathBuf>,

    pub database: Option<Database>,

    pub storage: Option<Storage>,

    /// Directory for local storage
    pub storage_path: Option<String>,

    pub redis: Option<bool>,

    pub docker: Option<bool>,

    pub examples: Option<bool>,

    /// YAML answers file replacing the prompts
    pub answers: Option<PathBuf>,

    /// Registry base URL override, resolved by the binary
    pub registry_url: Option<String>,

    /// Skip the registry lookup and use the fallback version
    pub offline: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Collect options
    let options = match &args.answers {
        Some(path) => load_answers(path, &args)?,
        None => collect_options(&args)?,
    };

    // Step 2: Refuse occupied destinations
    check_destination(options.project_path())?;

    // Step 3: Resolve the framework version
    let framework = resolve_version(config, &args).await?;

    // Step 4: Write the project
    create_project(&options, &framework).await?;

    // Step 5: Show next steps
    print_next_steps(&options)?;

    Ok(())
}

fn load_answers(path: &Path, args: &CreateArgs) -> Result<ProjectOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    let mut file = OptionsFile::from_yaml(&content)?;

    if let Some(dir) = &args.directory {
        file.project_path = Some(dir.clone());
    }

    let options = ProjectOptions::try_from(file)?;
    cliclack::log::info(format!("Using answers from {}", path.display()))?;
    Ok(options)
}

fn collect_options(args: &CreateArgs) -> Result<ProjectOptions> {
    let name = select_name(args)?;
    let directory = select_directory(args, &name)?;

    let database = match args.database {
        Some(db) => db,
        None if args.yes => Database::Sqlite,
        None => cliclack::select("Database")
            .item(Database::Sqlite, "SQLite", "embedded, nothing to install")
            .item(Database::Postgresql, "PostgreSQL", "needs a running server")
            .interact()?,
    };

    let storage = match args.storage {
        Some(storage) => storage,
        None if args.yes => Storage::Local,
        None => cliclack::select("File storage")
            .item(Storage::Local, "Local filesystem", "")
            .item(Storage::ObjectStorage, "S3-compatible object storage", "")
            .interact()?,
    };

    let storage_path = match (&args.storage_path, storage) {
        (Some(path), _) => Some(path.clone()),
        (None, Storage::Local) if !args.yes => {
            let input: String = cliclack::input("Local storage directory")
                .placeholder(DEFAULT_LOCAL_STORAGE_PATH)
                .default_input(DEFAULT_LOCAL_STORAGE_PATH)
                .interact()?;
            Some(input)
        }
        _ => None,
    };

    let use_redis = confirm(args.redis, args.yes, "Use Redis for the job queue?", false)?;
    let include_docker = confirm(args.docker, args.yes, "Add Docker support?", false)?;
    let include_examples = confirm(args.examples, args.yes, "Include an example collector?", true)?;

    let mut builder = ProjectOptions::builder(name, directory)
        .database(database)
        .storage(storage)
        .use_redis(use_redis)
        .include_docker(include_docker)
        .include_examples(include_examples);

    if let Some(path) = storage_path {
        builder = builder.local_storage_path(path);
    }

    Ok(builder.build()?)
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_project_name(name)?;
        return Ok(name.clone());
    }

    if args.yes {
        return Ok(DEFAULT_PROJECT_NAME.to_string());
    }

    let name: String = cliclack::input("Project name")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
        .interact()?;

    Ok(name)
}

fn select_directory(args: &CreateArgs, name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) => dir.clone(),
        None if args.yes => PathBuf::from(name),
        None => {
            let default = format!("./{}", name);
            let input: String = cliclack::input("Project directory")
                .placeholder(&default)
                .default_input(&default)
                .interact()?;
            PathBuf::from(input)
        }
    };

    let path = if path.is_absolute() {
        path
    } else {
        current_dir.join(path)
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    Ok(path)
}

fn confirm(flag: Option<bool>, yes: bool, prompt: &str, default: bool) -> Result<bool> {
    match flag {
        Some(value) => Ok(value),
        None if yes => Ok(default),
        None => Ok(cliclack::confirm(prompt).initial_value(default).interact()?),
    }
}

/// The destination may be missing or an empty directory, nothing else
fn check_destination(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if !path.is_dir() {
        anyhow::bail!("{} exists and is not a directory", path.display());
    }

    let count = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .count();
    if count > 0 {
        anyhow::bail!(
            "Directory {} is not empty ({} existing items). Choose another location.",
            path.display(),
            count
        );
    }

    Ok(())
}

async fn resolve_version<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<Framework> {
    if args.offline {
        cliclack::log::info(format!(
            "Offline: using {} {}",
            config.framework_package(),
            config.fallback_version()
        ))?;
        let pinned = PinnedVersion(config.fallback_version().to_string());
        return Ok(resolve_framework(config, &pinned).await);
    }

    let registry = args
        .registry_url
        .as_deref()
        .unwrap_or(config.default_registry_url());
    let registry = match Url::parse(registry) {
        Ok(url) => url,
        Err(e) => {
            log::warn!(
                "invalid registry URL '{}' ({}), using {} {}",
                registry,
                e,
                config.framework_package(),
                config.fallback_version()
            );
            let pinned = PinnedVersion(config.fallback_version().to_string());
            return Ok(resolve_framework(config, &pinned).await);
        }
    };

    let spinner = cliclack::spinner();
    spinner.start(format!("Resolving latest {}...", config.framework_package()));

    let lookup = RegistryLookup::new(registry, config.user_agent(), config.fallback_version());
    let framework = resolve_framework(config, &lookup).await;

    spinner.stop(format!("{} {}", framework.package, framework.version));
    Ok(framework)
}

async fn create_project(options: &ProjectOptions, framework: &Framework) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let sink = DiskSink::new(options.project_path());
    match emit::generate(options, framework, &sink).await {
        Ok(written) => {
            spinner.stop(format!(
                "Created {} files in {}",
                written.len(),
                options.project_path().display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.error("Failed to create project");
            Err(e.into())
        }
    }
}

fn print_next_steps(options: &ProjectOptions) -> Result<()> {
    let current = std::env::current_dir().ok();

    println!();
    println!("  Next steps");
    println!();

    let mut n = 1;
    if current.as_deref() != Some(options.project_path()) {
        println!(
            "  {}.  {}",
            n,
            format!("cd {}", options.project_path().display()).cyan()
        );
        n += 1;
    }

    for step in guide_steps(options) {
        println!("  {}.  {}", n, step.title);
        for command in &step.commands {
            println!("      {}", command.cyan());
        }
        n += 1;
    }

    cliclack::outro("Happy collecting!")?;

    Ok(())
}
