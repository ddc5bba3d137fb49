//! package.json

use super::{Artifact, ArtifactKind};
use crate::error::{Result, ScaffoldError};
use crate::fragments::dependencies::select_dependencies;
use crate::options::ProjectOptions;
use crate::product::Framework;
use serde::Serialize;
use std::collections::BTreeMap;

pub const ENTRY_MAIN: &str = "dist/index.js";
pub const CLI_BIN: &str = "bin/cli.js";

#[derive(Debug, Serialize)]
struct Scripts {
    build: &'static str,
    dev: &'static str,
    start: &'static str,
}

const SCRIPTS: Scripts = Scripts {
    build: "tsc",
    dev: "tsx watch src/index.ts",
    start: "node dist/index.js",
};

#[derive(Debug, Serialize)]
struct Engines {
    node: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'static str,
    private: bool,
    description: String,
    main: &'static str,
    #[serde(rename = "type")]
    module_type: &'static str,
    bin: BTreeMap<&'a str, &'static str>,
    scripts: Scripts,
    engines: Engines,
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
}

/// Compose the package manifest from the dependency selection
pub fn compose_manifest(options: &ProjectOptions, framework: &Framework) -> Result<Artifact> {
    let deps = select_dependencies(options, framework);

    let manifest = PackageManifest {
        name: options.project_name(),
        version: "0.1.0",
        private: true,
        description: format!("{} application", framework.display_name),
        main: ENTRY_MAIN,
        module_type: "module",
        bin: BTreeMap::from([(options.project_name(), CLI_BIN)]),
        scripts: SCRIPTS,
        engines: Engines { node: ">=20" },
        dependencies: deps.runtime,
        dev_dependencies: deps.dev,
    };

    let mut contents = serde_json::to_string_pretty(&manifest)
        .map_err(|e| ScaffoldError::serialize("package.json", e))?;
    contents.push('\n');

    Ok(Artifact::new(ArtifactKind::Manifest, contents))
}
