//! Classes the generated entry point imports and instantiates

use crate::options::{ProjectOptions, Storage};

/// Module the example collectors are re-exported from, relative to the entry point
pub const EXAMPLES_MODULE: &str = "./collectors/index.js";

pub const ENGINE_CLASS: &str = "Engine";
pub const DATABASE_CLASS: &str = "KnexDatabase";
pub const EXAMPLE_COLLECTOR_CLASS: &str = "PostFeedCollector";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imports {
    pub storage_class: &'static str,
    pub queue_class: &'static str,
    /// Example collectors to register with the engine; empty when examples are off
    pub collectors: Vec<&'static str>,
}

impl Imports {
    /// Named imports from the framework package, sorted
    pub fn framework_names(&self) -> Vec<&'static str> {
        let mut names = vec![
            ENGINE_CLASS,
            DATABASE_CLASS,
            self.storage_class,
            self.queue_class,
        ];
        names.sort_unstable();
        names
    }
}

/// Select adapter and collector classes for the chosen storage and examples
pub fn select_imports(options: &ProjectOptions) -> Imports {
    let storage_class = match options.storage() {
        Storage::Local => "LocalStorage",
        Storage::ObjectStorage => "S3Storage",
    };

    let queue_class = if options.use_redis() {
        "RedisQueue"
    } else {
        "MemoryQueue"
    };

    let collectors = if options.include_examples() {
        vec![EXAMPLE_COLLECTOR_CLASS]
    } else {
        Vec::new()
    };

    Imports {
        storage_class,
        queue_class,
        collectors,
    }
}
