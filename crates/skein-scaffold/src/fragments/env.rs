//! Environment variable selection
//!
//! The returned list is the single schema both the entry point's validator and the
//! `.env.example` template are rendered from.

use crate::options::{Database, ProjectOptions, Storage};

pub const PORT: &str = "PORT";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_FILENAME: &str = "DB_FILENAME";
pub const STORAGE_PATH: &str = "STORAGE_PATH";
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const S3_REGION: &str = "S3_REGION";
pub const S3_ACCESS_KEY_ID: &str = "S3_ACCESS_KEY_ID";
pub const S3_SECRET_ACCESS_KEY: &str = "S3_SECRET_ACCESS_KEY";
pub const S3_BUCKET: &str = "S3_BUCKET";
pub const REDIS_HOST: &str = "REDIS_HOST";
pub const REDIS_PORT: &str = "REDIS_PORT";

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_REDIS_HOST: &str = "localhost";
pub const DEFAULT_REDIS_PORT: &str = "6379";

/// How the generated validator checks a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Port,
    Url,
}

impl ValueKind {
    /// Literal used in the generated schema
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Port => "port",
            ValueKind::Url => "url",
        }
    }
}

/// Concern a variable belongs to; drives grouping in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvGroup {
    Server,
    Database,
    Storage,
    Queue,
}

impl EnvGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            EnvGroup::Server => "Server",
            EnvGroup::Database => "Database",
            EnvGroup::Storage => "Storage",
            EnvGroup::Queue => "Queue",
        }
    }
}

/// One declared environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: &'static str,
    pub required: bool,
    /// Usable value applied when the variable is unset; `None` for required variables
    pub default: Option<String>,
    /// Explanatory stand-in written to the template for required variables
    pub placeholder: Option<&'static str>,
    pub kind: ValueKind,
    pub comment: &'static str,
    pub group: EnvGroup,
}

impl EnvVar {
    fn required(name: &'static str, placeholder: &'static str, comment: &'static str, group: EnvGroup) -> Self {
        Self {
            name,
            required: true,
            default: None,
            placeholder: Some(placeholder),
            kind: ValueKind::String,
            comment,
            group,
        }
    }

    fn optional(name: &'static str, default: impl Into<String>, comment: &'static str, group: EnvGroup) -> Self {
        Self {
            name,
            required: false,
            default: Some(default.into()),
            placeholder: None,
            kind: ValueKind::String,
            comment,
            group,
        }
    }

    fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Value written after `=` in the template
    pub fn template_value(&self) -> &str {
        self.default
            .as_deref()
            .or(self.placeholder)
            .unwrap_or_default()
    }
}

/// Select the ordered list of variables the generated program reads
pub fn select_env_vars(options: &ProjectOptions) -> Vec<EnvVar> {
    let mut vars = vec![EnvVar::optional(
        PORT,
        DEFAULT_PORT,
        "HTTP port the engine listens on",
        EnvGroup::Server,
    )
    .kind(ValueKind::Port)];

    match options.database() {
        Database::Postgresql => vars.extend([
            EnvVar::required(DB_HOST, "your-postgres-host", "PostgreSQL server hostname", EnvGroup::Database),
            EnvVar::required(DB_USER, "your-postgres-user", "PostgreSQL user", EnvGroup::Database),
            EnvVar::required(DB_PASSWORD, "change-me", "PostgreSQL password", EnvGroup::Database),
            EnvVar::required(DB_NAME, "your-database-name", "PostgreSQL database name", EnvGroup::Database),
        ]),
        Database::Sqlite => vars.push(EnvVar::optional(
            DB_FILENAME,
            format!("./data/{}.db", options.project_name()),
            "SQLite database file",
            EnvGroup::Database,
        )),
    }

    match options.storage() {
        Storage::Local => vars.push(EnvVar::optional(
            STORAGE_PATH,
            options.local_storage_path(),
            "Directory for stored files",
            EnvGroup::Storage,
        )),
        Storage::ObjectStorage => vars.extend([
            EnvVar::required(
                S3_ENDPOINT,
                "https://s3.your-provider.example.com",
                "Object storage endpoint URL",
                EnvGroup::Storage,
            )
            .kind(ValueKind::Url),
            EnvVar::required(S3_REGION, "your-region", "Object storage region", EnvGroup::Storage),
            EnvVar::required(
                S3_ACCESS_KEY_ID,
                "your-access-key-id",
                "Object storage access key ID",
                EnvGroup::Storage,
            ),
            EnvVar::required(
                S3_SECRET_ACCESS_KEY,
                "your-secret-access-key",
                "Object storage secret access key",
                EnvGroup::Storage,
            ),
            EnvVar::optional(
                S3_BUCKET,
                options.project_name(),
                "Bucket for stored files",
                EnvGroup::Storage,
            ),
        ]),
    }

    if options.use_redis() {
        vars.extend([
            EnvVar::optional(REDIS_HOST, DEFAULT_REDIS_HOST, "Redis hostname", EnvGroup::Queue),
            EnvVar::optional(REDIS_PORT, DEFAULT_REDIS_PORT, "Redis port", EnvGroup::Queue)
                .kind(ValueKind::Port),
        ]);
    }

    vars
}
