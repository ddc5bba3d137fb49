//! Runtime configuration objects passed to the generated adapters

use super::env;
use crate::options::{Database, ProjectOptions, Storage};
use std::fmt::Write;

/// PostgreSQL listens here in every supported deployment
pub const POSTGRES_PORT: u16 = 5432;

/// A value inside a generated TypeScript object literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// `env.NAME`, already validated and defaulted at startup
    Env(&'static str),
    /// `Number(env.NAME)`
    EnvNumber(&'static str),
    Int(u16),
    Str(String),
    Bool(bool),
    Object(Vec<(&'static str, ConfigValue)>),
}

impl ConfigValue {
    /// Render as TypeScript; nested objects are indented from `indent`
    pub fn render(&self, indent: usize) -> String {
        match self {
            ConfigValue::Env(name) => format!("env.{}", name),
            ConfigValue::EnvNumber(name) => format!("Number(env.{})", name),
            ConfigValue::Int(n) => n.to_string(),
            ConfigValue::Str(s) => format!("'{}'", s),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Object(fields) => {
                let pad = "  ".repeat(indent + 1);
                let mut out = String::from("{\n");
                for (key, value) in fields {
                    let _ = writeln!(out, "{}{}: {},", pad, key, value.render(indent + 1));
                }
                out.push_str(&"  ".repeat(indent));
                out.push('}');
                out
            }
        }
    }

    /// Environment variables this value reads, in order of appearance
    pub fn env_refs(&self) -> Vec<&'static str> {
        match self {
            ConfigValue::Env(name) | ConfigValue::EnvNumber(name) => vec![*name],
            ConfigValue::Object(fields) => fields.iter().flat_map(|(_, v)| v.env_refs()).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Postgres {
        host: ConfigValue,
        port: ConfigValue,
        user: ConfigValue,
        password: ConfigValue,
        database: ConfigValue,
    },
    Sqlite {
        filename: ConfigValue,
    },
}

impl DatabaseConfig {
    /// Knex-style configuration object
    pub fn to_value(&self) -> ConfigValue {
        match self {
            DatabaseConfig::Postgres {
                host,
                port,
                user,
                password,
                database,
            } => ConfigValue::Object(vec![
                ("client", ConfigValue::Str("pg".to_string())),
                (
                    "connection",
                    ConfigValue::Object(vec![
                        ("host", host.clone()),
                        ("port", port.clone()),
                        ("user", user.clone()),
                        ("password", password.clone()),
                        ("database", database.clone()),
                    ]),
                ),
            ]),
            DatabaseConfig::Sqlite { filename } => ConfigValue::Object(vec![
                ("client", ConfigValue::Str("better-sqlite3".to_string())),
                ("connection", ConfigValue::Object(vec![("filename", filename.clone())])),
                ("useNullAsDefault", ConfigValue::Bool(true)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Bare directory path
    Local { path: ConfigValue },
    Object {
        access_key_id: ConfigValue,
        secret_access_key: ConfigValue,
        endpoint: ConfigValue,
        region: ConfigValue,
        bucket: ConfigValue,
    },
}

impl StorageConfig {
    /// Constructor argument for the storage adapter
    pub fn to_value(&self) -> ConfigValue {
        match self {
            StorageConfig::Local { path } => path.clone(),
            StorageConfig::Object {
                access_key_id,
                secret_access_key,
                endpoint,
                region,
                bucket,
            } => ConfigValue::Object(vec![
                (
                    "credentials",
                    ConfigValue::Object(vec![
                        ("accessKeyId", access_key_id.clone()),
                        ("secretAccessKey", secret_access_key.clone()),
                    ]),
                ),
                ("endpoint", endpoint.clone()),
                ("region", region.clone()),
                ("bucket", bucket.clone()),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueConfig {
    Memory,
    Redis { host: ConfigValue, port: ConfigValue },
}

impl QueueConfig {
    /// Constructor argument for the queue adapter, if it takes one
    pub fn to_value(&self) -> Option<ConfigValue> {
        match self {
            QueueConfig::Memory => None,
            QueueConfig::Redis { host, port } => Some(ConfigValue::Object(vec![
                ("host", host.clone()),
                ("port", port.clone()),
            ])),
        }
    }
}

/// Connection objects for every adapter the entry point constructs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub queue: QueueConfig,
}

impl RuntimeConfig {
    /// Every environment variable the adapters read
    pub fn env_refs(&self) -> Vec<&'static str> {
        let mut refs = self.database.to_value().env_refs();
        refs.extend(self.storage.to_value().env_refs());
        if let Some(queue) = self.queue.to_value() {
            refs.extend(queue.env_refs());
        }
        refs
    }
}

/// Select the connection objects for the chosen database, storage, and queue
pub fn select_runtime_config(options: &ProjectOptions) -> RuntimeConfig {
    let database = match options.database() {
        Database::Postgresql => DatabaseConfig::Postgres {
            host: ConfigValue::Env(env::DB_HOST),
            port: ConfigValue::Int(POSTGRES_PORT),
            user: ConfigValue::Env(env::DB_USER),
            password: ConfigValue::Env(env::DB_PASSWORD),
            database: ConfigValue::Env(env::DB_NAME),
        },
        Database::Sqlite => DatabaseConfig::Sqlite {
            filename: ConfigValue::Env(env::DB_FILENAME),
        },
    };

    let storage = match options.storage() {
        Storage::Local => StorageConfig::Local {
            path: ConfigValue::Env(env::STORAGE_PATH),
        },
        Storage::ObjectStorage => StorageConfig::Object {
            access_key_id: ConfigValue::Env(env::S3_ACCESS_KEY_ID),
            secret_access_key: ConfigValue::Env(env::S3_SECRET_ACCESS_KEY),
            endpoint: ConfigValue::Env(env::S3_ENDPOINT),
            region: ConfigValue::Env(env::S3_REGION),
            bucket: ConfigValue::Env(env::S3_BUCKET),
        },
    };

    let queue = if options.use_redis() {
        QueueConfig::Redis {
            host: ConfigValue::Env(env::REDIS_HOST),
            port: ConfigValue::EnvNumber(env::REDIS_PORT),
        }
    } else {
        QueueConfig::Memory
    };

    RuntimeConfig {
        database,
        storage,
        queue,
    }
}
