//! Package dependency selection

use crate::options::{Database, ProjectOptions, Storage};
use crate::product::Framework;
use std::collections::BTreeMap;

pub const KNEX: (&str, &str) = ("knex", "^3.1.0");
pub const COMMANDER: (&str, &str) = ("commander", "^12.1.0");
pub const DOTENV: (&str, &str) = ("dotenv", "^16.4.5");
pub const PG: (&str, &str) = ("pg", "^8.12.0");
pub const PG_TYPES: (&str, &str) = ("@types/pg", "^8.11.6");
pub const BETTER_SQLITE3: (&str, &str) = ("better-sqlite3", "^11.1.2");
pub const S3_CLIENT: (&str, &str) = ("@aws-sdk/client-s3", "^3.614.0");
pub const IOREDIS: (&str, &str) = ("ioredis", "^5.4.1");
pub const NODE_TYPES: (&str, &str) = ("@types/node", "^20.14.10");
pub const TYPESCRIPT: (&str, &str) = ("typescript", "^5.5.3");
pub const TSX: (&str, &str) = ("tsx", "^4.16.2");

/// Runtime and dev-only dependency maps, sorted by package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    pub runtime: BTreeMap<String, String>,
    pub dev: BTreeMap<String, String>,
}

impl Dependencies {
    fn add(&mut self, (name, version): (&str, &str)) {
        self.runtime.insert(name.to_string(), version.to_string());
    }

    fn add_dev(&mut self, (name, version): (&str, &str)) {
        self.dev.insert(name.to_string(), version.to_string());
    }

    /// Whether `package` appears in either map
    pub fn contains(&self, package: &str) -> bool {
        self.runtime.contains_key(package) || self.dev.contains_key(package)
    }
}

/// Select the packages the generated project depends on
pub fn select_dependencies(options: &ProjectOptions, framework: &Framework) -> Dependencies {
    let mut deps = Dependencies::default();

    deps.runtime
        .insert(framework.package.clone(), framework.version_constraint());
    deps.add(KNEX);
    deps.add(COMMANDER);
    deps.add(DOTENV);

    match options.database() {
        Database::Postgresql => {
            deps.add(PG);
            deps.add_dev(PG_TYPES);
        }
        Database::Sqlite => deps.add(BETTER_SQLITE3),
    }

    if options.storage() == Storage::ObjectStorage {
        deps.add(S3_CLIENT);
    }

    if options.use_redis() {
        deps.add(IOREDIS);
    }

    deps.add_dev(NODE_TYPES);
    deps.add_dev(TYPESCRIPT);
    deps.add_dev(TSX);

    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::framework;

    fn options(database: Database, storage: Storage, redis: bool) -> ProjectOptions {
        ProjectOptions::builder("demo", "demo")
            .database(database)
            .storage(storage)
            .use_redis(redis)
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_dependencies_always_present() {
        let deps = select_dependencies(&options(Database::Sqlite, Storage::Local, false), &framework());
        assert_eq!(deps.runtime.get("@skein/core").map(String::as_str), Some("^0.4.0"));
        assert!(deps.runtime.contains_key("knex"));
        assert!(deps.runtime.contains_key("commander"));
        for dev in ["@types/node", "typescript", "tsx"] {
            assert!(deps.dev.contains_key(dev), "missing dev dependency {dev}");
        }
    }

    #[test]
    fn test_sqlite_selects_embedded_driver() {
        let deps = select_dependencies(&options(Database::Sqlite, Storage::Local, false), &framework());
        assert!(deps.runtime.contains_key("better-sqlite3"));
        assert!(!deps.contains("pg"));
        assert!(!deps.contains("@types/pg"));
    }

    #[test]
    fn test_postgres_selects_driver_and_types() {
        let deps = select_dependencies(&options(Database::Postgresql, Storage::Local, false), &framework());
        assert!(deps.runtime.contains_key("pg"));
        assert!(deps.dev.contains_key("@types/pg"));
        assert!(!deps.contains("better-sqlite3"));
    }

    #[test]
    fn test_object_storage_and_redis_clients() {
        let plain = select_dependencies(&options(Database::Sqlite, Storage::Local, false), &framework());
        assert!(!plain.contains("@aws-sdk/client-s3"));
        assert!(!plain.contains("ioredis"));

        let full = select_dependencies(&options(Database::Sqlite, Storage::ObjectStorage, true), &framework());
        assert!(full.runtime.contains_key("@aws-sdk/client-s3"));
        assert!(full.runtime.contains_key("ioredis"));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let opts = options(Database::Postgresql, Storage::ObjectStorage, true);
        assert_eq!(
            select_dependencies(&opts, &framework()),
            select_dependencies(&opts, &framework())
        );
    }
}
