//! The validated record of scaffolding choices
//!
//! A [`ProjectOptions`] can only be obtained through [`OptionsBuilder::build`] or by
//! converting an [`OptionsFile`], both of which enforce the field rules. Everything
//! downstream (selectors, composers, the driver) can therefore treat it as valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Storage path used when local storage is chosen without an explicit path
pub const DEFAULT_LOCAL_STORAGE_PATH: &str = "./uploads";

/// npm rejects package names longer than this
const MAX_NAME_LEN: usize = 214;

/// Database engine backing the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Sqlite,
    #[serde(alias = "postgres")]
    #[value(alias = "postgres")]
    Postgresql,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::Sqlite, Database::Postgresql];
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::Sqlite => write!(f, "sqlite"),
            Database::Postgresql => write!(f, "postgresql"),
        }
    }
}

/// Where uploaded and collected files are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Storage {
    Local,
    #[serde(alias = "s3")]
    #[value(alias = "s3")]
    ObjectStorage,
}

impl Storage {
    pub const ALL: [Storage; 2] = [Storage::Local, Storage::ObjectStorage];
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Local => write!(f, "local"),
            Storage::ObjectStorage => write!(f, "object-storage"),
        }
    }
}

/// Immutable, validated scaffolding choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    project_name: String,
    project_path: PathBuf,
    database: Database,
    storage: Storage,
    local_storage_path: Option<String>,
    use_redis: bool,
    include_docker: bool,
    include_examples: bool,
}

impl ProjectOptions {
    /// Start building options for a project; the path is where files will land
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> OptionsBuilder {
        OptionsBuilder {
            project_name: name.into(),
            project_path: path.into(),
            database: Database::Sqlite,
            storage: Storage::Local,
            local_storage_path: None,
            use_redis: false,
            include_docker: false,
            include_examples: false,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Local storage directory, falling back to `./uploads`.
    ///
    /// Only meaningful when [`Storage::Local`] is selected.
    pub fn local_storage_path(&self) -> &str {
        self.local_storage_path
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_STORAGE_PATH)
    }

    pub fn use_redis(&self) -> bool {
        self.use_redis
    }

    pub fn include_docker(&self) -> bool {
        self.include_docker
    }

    pub fn include_examples(&self) -> bool {
        self.include_examples
    }

    pub fn is_postgres(&self) -> bool {
        self.database == Database::Postgresql
    }

    pub fn is_local_storage(&self) -> bool {
        self.storage == Storage::Local
    }
}

/// Builder for [`ProjectOptions`]
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    project_name: String,
    project_path: PathBuf,
    database: Database,
    storage: Storage,
    local_storage_path: Option<String>,
    use_redis: bool,
    include_docker: bool,
    include_examples: bool,
}

impl OptionsBuilder {
    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn local_storage_path(mut self, path: impl Into<String>) -> Self {
        self.local_storage_path = Some(path.into());
        self
    }

    pub fn use_redis(mut self, enabled: bool) -> Self {
        self.use_redis = enabled;
        self
    }

    pub fn include_docker(mut self, enabled: bool) -> Self {
        self.include_docker = enabled;
        self
    }

    pub fn include_examples(mut self, enabled: bool) -> Self {
        self.include_examples = enabled;
        self
    }

    /// Validate every field and freeze the record
    pub fn build(self) -> Result<ProjectOptions, ConfigError> {
        validate_project_name(&self.project_name)?;

        if self.project_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyProjectPath);
        }

        // A path given alongside object storage is ignored rather than rejected.
        let local_storage_path = match (self.storage, self.local_storage_path) {
            (Storage::Local, Some(path)) => {
                validate_storage_path(&path)?;
                Some(path)
            }
            _ => None,
        };

        Ok(ProjectOptions {
            project_name: self.project_name,
            project_path: self.project_path,
            database: self.database,
            storage: self.storage,
            local_storage_path,
            use_redis: self.use_redis,
            include_docker: self.include_docker,
            include_examples: self.include_examples,
        })
    }
}

/// Answers file layout, as written by hand or by a previous run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionsFile {
    pub project_name: String,
    #[serde(default)]
    pub project_path: Option<PathBuf>,
    pub database: Database,
    pub storage: Storage,
    #[serde(default)]
    pub local_storage_path: Option<String>,
    #[serde(default)]
    pub use_redis: bool,
    #[serde(default)]
    pub include_docker: bool,
    #[serde(default)]
    pub include_examples: bool,
}

impl OptionsFile {
    /// Parse an answers file from YAML
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl TryFrom<OptionsFile> for ProjectOptions {
    type Error = ConfigError;

    fn try_from(file: OptionsFile) -> Result<Self, Self::Error> {
        let path = file
            .project_path
            .unwrap_or_else(|| PathBuf::from(&file.project_name));

        let mut builder = ProjectOptions::builder(file.project_name, path)
            .database(file.database)
            .storage(file.storage)
            .use_redis(file.use_redis)
            .include_docker(file.include_docker)
            .include_examples(file.include_examples);

        if let Some(storage_path) = file.local_storage_path {
            builder = builder.local_storage_path(storage_path);
        }

        builder.build()
    }
}

/// Check a name against npm's package-name rules (lowercase subset)
pub fn validate_project_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidProjectName {
        name: name.to_string(),
        reason,
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("name must not be empty"));
    };

    if name.len() > MAX_NAME_LEN {
        return Err(invalid("name must be at most 214 characters"));
    }

    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return Err(invalid("name must start with a lowercase letter or digit"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(invalid(
            "only lowercase letters, digits, hyphens and underscores are allowed",
        ));
    }

    Ok(())
}

fn validate_storage_path(path: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidStoragePath {
        path: path.to_string(),
        reason,
    };

    if path.trim().is_empty() {
        return Err(invalid("path must not be empty"));
    }

    // dotenv trims unquoted values.
    if path.trim() != path {
        return Err(invalid("leading or trailing whitespace is not allowed"));
    }

    // The path is embedded in TypeScript string literals and unquoted .env lines,
    // where dotenv starts a comment at '#'.
    if path
        .chars()
        .any(|c| matches!(c, '\'' | '"' | '`' | '\\' | '#' | '\n' | '\r'))
    {
        return Err(invalid(
            "quotes, backticks, backslashes, '#' and newlines are not allowed",
        ));
    }

    Ok(())
}
