//! Human-readable summaries of the chosen stack

use crate::options::{Database, ProjectOptions, Storage};
use serde::Serialize;

/// Strings shown in generated startup logs and in the guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Display {
    pub database: &'static str,
    pub storage: String,
    pub queue: &'static str,
}

pub fn select_display(options: &ProjectOptions) -> Display {
    let database = match options.database() {
        Database::Postgresql => "PostgreSQL",
        Database::Sqlite => "SQLite",
    };

    let storage = match options.storage() {
        Storage::Local => format!("Local filesystem ({})", options.local_storage_path()),
        Storage::ObjectStorage => "S3-compatible object storage".to_string(),
    };

    let queue = if options.use_redis() {
        "Redis"
    } else {
        "In-memory"
    };

    Display {
        database,
        storage,
        queue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display() {
        let options = ProjectOptions::builder("demo", "demo").build().unwrap();
        let display = select_display(&options);
        assert_eq!(display.database, "SQLite");
        assert_eq!(display.storage, "Local filesystem (./uploads)");
        assert_eq!(display.queue, "In-memory");
    }

    #[test]
    fn test_postgres_s3_redis_display() {
        let options = ProjectOptions::builder("demo", "demo")
            .database(Database::Postgresql)
            .storage(Storage::ObjectStorage)
            .use_redis(true)
            .build()
            .unwrap();
        let display = select_display(&options);
        assert_eq!(display.database, "PostgreSQL");
        assert_eq!(display.storage, "S3-compatible object storage");
        assert_eq!(display.queue, "Redis");
    }
}
