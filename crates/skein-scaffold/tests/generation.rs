//! End-to-end checks across every option combination

use skein_scaffold::compose::docker::ComposeFile;
use skein_scaffold::emit::{generate, plan};
use skein_scaffold::{Artifact, ArtifactKind, Database, DiskSink, Framework, ProjectOptions, Storage};
use std::collections::{BTreeMap, BTreeSet};
use tempfile::TempDir;
use walkdir::WalkDir;

fn framework() -> Framework {
    Framework {
        package: "@skein/core".to_string(),
        version: "0.4.0".to_string(),
        cli_tool: "skein".to_string(),
        generator: "create-skein".to_string(),
        display_name: "Skein".to_string(),
        docs_url: "https://skein.dev/docs".to_string(),
    }
}

/// All 32 combinations of the five choices
fn all_options() -> Vec<ProjectOptions> {
    let mut all = Vec::new();
    for database in Database::ALL {
        for storage in Storage::ALL {
            for redis in [false, true] {
                for docker in [false, true] {
                    for examples in [false, true] {
                        all.push(
                            ProjectOptions::builder("demo", "demo")
                                .database(database)
                                .storage(storage)
                                .use_redis(redis)
                                .include_docker(docker)
                                .include_examples(examples)
                                .build()
                                .unwrap(),
                        );
                    }
                }
            }
        }
    }
    all
}

fn by_kind(artifacts: &[Artifact]) -> BTreeMap<ArtifactKind, &str> {
    artifacts
        .iter()
        .map(|a| (a.kind, a.contents.as_str()))
        .collect()
}

/// Package names from `import ... from '<spec>'` and `import '<spec>'` lines
fn imported_packages(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter(|l| l.starts_with("import ") || l.starts_with("export "))
        .filter_map(|l| {
            let start = l.find('\'')? + 1;
            let end = start + l[start..].find('\'')?;
            Some(&l[start..end])
        })
        .filter(|spec| !spec.starts_with('.') && !spec.starts_with("node:"))
        .map(|spec| {
            let segments: Vec<&str> = spec.split('/').collect();
            if spec.starts_with('@') {
                segments[..2].join("/")
            } else {
                segments[0].to_string()
            }
        })
        .collect()
}

/// Uppercase identifiers following `env.`
fn env_reads(source: &str) -> BTreeSet<String> {
    source
        .match_indices("env.")
        .map(|(i, _)| {
            source[i + 4..]
                .chars()
                .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn template_keys(template: &str) -> BTreeSet<String> {
    template
        .lines()
        .filter(|l| !l.starts_with('#'))
        .filter_map(|l| l.split_once('=').map(|(k, _)| k.to_string()))
        .collect()
}

#[test]
fn test_imports_are_declared_dependencies() {
    for options in all_options() {
        let artifacts = plan(&options, &framework()).unwrap();
        let files = by_kind(&artifacts);
        let manifest: serde_json::Value =
            serde_json::from_str(files[&ArtifactKind::Manifest]).unwrap();

        let mut imported = BTreeSet::new();
        for kind in [
            ArtifactKind::EntryPoint,
            ArtifactKind::CliWrapper,
            ArtifactKind::ExampleCollector,
            ArtifactKind::ExampleIndex,
        ] {
            if let Some(source) = files.get(&kind) {
                imported.extend(imported_packages(source));
            }
        }
        assert!(imported.contains("@skein/core"));
        assert!(imported.contains("commander"));

        for package in &imported {
            let declared = manifest["dependencies"].get(package).is_some()
                || manifest["devDependencies"].get(package).is_some();
            assert!(declared, "{package} imported but not declared for {options:?}");
        }
    }
}

#[test]
fn test_env_reads_match_template() {
    for options in all_options() {
        let artifacts = plan(&options, &framework()).unwrap();
        let files = by_kind(&artifacts);

        let read = env_reads(files[&ArtifactKind::EntryPoint]);
        let declared = template_keys(files[&ArtifactKind::EnvTemplate]);
        assert_eq!(read, declared, "{options:?}");
    }
}

#[test]
fn test_compose_service_set() {
    for options in all_options().into_iter().filter(|o| o.include_docker()) {
        let artifacts = plan(&options, &framework()).unwrap();
        let compose: ComposeFile =
            serde_yaml::from_str(by_kind(&artifacts)[&ArtifactKind::Compose]).unwrap();

        let mut expected = vec!["app"];
        if options.is_postgres() {
            expected.push("postgres");
        }
        if options.use_redis() {
            expected.push("redis");
        }
        assert_eq!(compose.service_names(), expected, "{options:?}");
        assert_eq!(compose.volumes.contains_key("postgres-data"), options.is_postgres());

        let mut edges = compose.services["app"].depends_on.clone();
        edges.sort();
        assert_eq!(edges, expected[1..].to_vec(), "{options:?}");
    }
}

#[test]
fn test_gated_artifacts() {
    for options in all_options() {
        let artifacts = plan(&options, &framework()).unwrap();
        let files = by_kind(&artifacts);

        for kind in [ArtifactKind::ExampleCollector, ArtifactKind::ExampleIndex] {
            assert_eq!(files.contains_key(&kind), options.include_examples());
        }
        for kind in [ArtifactKind::Dockerfile, ArtifactKind::Compose] {
            assert_eq!(files.contains_key(&kind), options.include_docker());
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    for options in all_options() {
        assert_eq!(
            plan(&options, &framework()).unwrap(),
            plan(&options, &framework()).unwrap()
        );
    }
}

#[test]
fn test_templates_fully_rendered() {
    for options in all_options() {
        for artifact in plan(&options, &framework()).unwrap() {
            assert!(
                !artifact.contents.contains("{{") && !artifact.contents.contains("}}"),
                "{} has unrendered tags for {options:?}",
                artifact.path()
            );
            assert!(!artifact.contents.contains("\n\n\n"), "{}", artifact.path());
        }
    }
}

#[test]
fn test_sqlite_local_scenario() {
    let options = ProjectOptions::builder("demo", "demo").build().unwrap();
    let artifacts = plan(&options, &framework()).unwrap();
    let files = by_kind(&artifacts);

    let core: BTreeSet<ArtifactKind> = [
        ArtifactKind::Manifest,
        ArtifactKind::EntryPoint,
        ArtifactKind::CompilerConfig,
        ArtifactKind::EnvTemplate,
        ArtifactKind::IgnoreFile,
        ArtifactKind::Guide,
    ]
    .into_iter()
    .collect();
    let produced: BTreeSet<ArtifactKind> = files.keys().copied().collect();
    let extra: Vec<_> = produced.difference(&core).collect();
    assert!(core.is_subset(&produced));
    assert_eq!(extra, vec![&ArtifactKind::CliWrapper]);

    let manifest: serde_json::Value = serde_json::from_str(files[&ArtifactKind::Manifest]).unwrap();
    assert!(manifest["dependencies"].get("better-sqlite3").is_some());
    assert!(manifest["dependencies"].get("pg").is_none());

    let template = files[&ArtifactKind::EnvTemplate];
    assert!(template.contains("DB_FILENAME=./data/demo.db"));
    for absent in ["DB_HOST", "DB_USER", "DB_PASSWORD"] {
        assert!(!template.contains(absent), "{absent} should not be declared");
    }
}

#[tokio::test]
async fn test_generate_writes_files_to_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("shop");

    let options = ProjectOptions::builder("shop", &root)
        .database(Database::Postgresql)
        .include_docker(true)
        .include_examples(true)
        .build()
        .unwrap();
    let written = generate(&options, &framework(), &DiskSink::new(&root))
        .await
        .unwrap();

    let on_disk: BTreeSet<String> = WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(&root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    let expected: BTreeSet<String> = written.iter().map(|a| a.path().to_string()).collect();
    assert_eq!(on_disk, expected);
    assert_eq!(on_disk.len(), 11);

    let manifest = std::fs::read_to_string(root.join("package.json")).unwrap();
    assert!(manifest.contains("\"pg\""));
}

#[tokio::test]
async fn test_generate_into_existing_empty_directory() {
    let temp = TempDir::new().unwrap();
    let options = ProjectOptions::builder("demo", temp.path()).build().unwrap();
    let written = generate(&options, &framework(), &DiskSink::new(temp.path()))
        .await
        .unwrap();
    assert_eq!(written.len(), 7);
    assert!(temp.path().join("bin").join("cli.js").is_file());
}
