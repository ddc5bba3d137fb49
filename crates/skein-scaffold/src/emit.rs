//! Emission driver: decide which artifacts exist, compose them, and write them out

use crate::compose::{self, Artifact};
use crate::error::{Result, ScaffoldError};
use crate::options::ProjectOptions;
use crate::product::Framework;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Persistence capability the driver writes through
#[allow(async_fn_in_trait)]
pub trait FileSink {
    /// Create `relative_dir` (and its parents); succeeds if it already exists
    async fn ensure_dir(&self, relative_dir: &str) -> Result<()>;

    /// Write `contents` to `relative_path`, replacing any existing file
    async fn write(&self, relative_path: &str, contents: &[u8]) -> Result<()>;
}

/// Writes below a root directory on the local file system
#[derive(Debug, Clone)]
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl FileSink for DiskSink {
    async fn ensure_dir(&self, relative_dir: &str) -> Result<()> {
        let path = self.resolve(relative_dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| ScaffoldError::io(&path, e))
    }

    async fn write(&self, relative_path: &str, contents: &[u8]) -> Result<()> {
        let path = self.resolve(relative_path);
        fs::write(&path, contents)
            .await
            .map_err(|e| ScaffoldError::io(&path, e))
    }
}

/// Compose every artifact the options call for, without touching the file system.
///
/// Always: manifest, entry point, compiler config, env template, ignore file, guide,
/// CLI wrapper. Example sources only with `include_examples`, container files only
/// with `include_docker`.
pub fn plan(options: &ProjectOptions, framework: &Framework) -> Result<Vec<Artifact>> {
    let mut artifacts = vec![
        compose::compose_manifest(options, framework)?,
        compose::compose_entry_point(options, framework)?,
        compose::compose_tsconfig()?,
        compose::compose_env_template(options)?,
        compose::compose_ignore_file()?,
        compose::compose_guide(options, framework)?,
        compose::compose_cli_wrapper(options, framework)?,
    ];

    if options.include_examples() {
        artifacts.push(compose::compose_example_collector(framework)?);
        artifacts.push(compose::compose_example_index()?);
    }

    if options.include_docker() {
        artifacts.push(compose::compose_dockerfile()?);
        artifacts.push(compose::compose_compose_file(options)?);
    }

    log::info!(
        "planned {} files for {}",
        artifacts.len(),
        options.project_name()
    );

    Ok(artifacts)
}

/// Write artifacts through `sink`, stopping at the first failure.
///
/// Already-written files are left in place on failure.
pub async fn emit<S: FileSink>(sink: &S, artifacts: &[Artifact]) -> Result<()> {
    sink.ensure_dir("").await?;

    for artifact in artifacts {
        let path = artifact.path();
        if let Some((parent, _)) = path.rsplit_once('/') {
            sink.ensure_dir(parent).await?;
        }
        sink.write(path, artifact.contents.as_bytes()).await?;
        log::debug!("wrote {}", path);
    }

    Ok(())
}

/// Plan and emit in one go, returning what was written
pub async fn generate<S: FileSink>(
    options: &ProjectOptions,
    framework: &Framework,
    sink: &S,
) -> Result<Vec<Artifact>> {
    let artifacts = plan(options, framework)?;
    emit(sink, &artifacts).await?;
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ArtifactKind;
    use crate::product::testing::framework;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records writes in memory; optionally fails on one path
    #[derive(Default)]
    struct MemorySink {
        dirs: Mutex<Vec<String>>,
        files: Mutex<BTreeMap<String, Vec<u8>>>,
        fail_on: Option<&'static str>,
    }

    impl FileSink for MemorySink {
        async fn ensure_dir(&self, relative_dir: &str) -> Result<()> {
            self.dirs.lock().unwrap().push(relative_dir.to_string());
            Ok(())
        }

        async fn write(&self, relative_path: &str, contents: &[u8]) -> Result<()> {
            if self.fail_on == Some(relative_path) {
                return Err(ScaffoldError::io(
                    relative_path,
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            self.files
                .lock()
                .unwrap()
                .insert(relative_path.to_string(), contents.to_vec());
            Ok(())
        }
    }

    fn kinds(artifacts: &[Artifact]) -> Vec<ArtifactKind> {
        artifacts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_plan_minimal_project() {
        let options = ProjectOptions::builder("demo", "demo").build().unwrap();
        let artifacts = plan(&options, &framework()).unwrap();
        assert_eq!(
            kinds(&artifacts),
            vec![
                ArtifactKind::Manifest,
                ArtifactKind::EntryPoint,
                ArtifactKind::CompilerConfig,
                ArtifactKind::EnvTemplate,
                ArtifactKind::IgnoreFile,
                ArtifactKind::Guide,
                ArtifactKind::CliWrapper,
            ]
        );
    }

    #[test]
    fn test_plan_gates_optional_artifacts() {
        let options = ProjectOptions::builder("demo", "demo")
            .include_examples(true)
            .include_docker(true)
            .build()
            .unwrap();
        let planned = kinds(&plan(&options, &framework()).unwrap());
        for kind in [
            ArtifactKind::ExampleCollector,
            ArtifactKind::ExampleIndex,
            ArtifactKind::Dockerfile,
            ArtifactKind::Compose,
        ] {
            assert!(planned.contains(&kind), "missing {kind:?}");
        }
        assert_eq!(planned.len(), 11);
    }

    #[tokio::test]
    async fn test_emit_creates_directories_before_writes() {
        let options = ProjectOptions::builder("demo", "demo")
            .include_examples(true)
            .build()
            .unwrap();
        let sink = MemorySink::default();
        generate(&options, &framework(), &sink).await.unwrap();

        let dirs = sink.dirs.lock().unwrap();
        assert_eq!(dirs.first().map(String::as_str), Some(""));
        assert!(dirs.contains(&"src/collectors".to_string()));
        assert!(dirs.contains(&"bin".to_string()));

        let files = sink.files.lock().unwrap();
        assert_eq!(files.len(), 9);
        assert!(files.contains_key("src/collectors/post-feed.ts"));
    }

    #[tokio::test]
    async fn test_emit_stops_at_first_failure() {
        let options = ProjectOptions::builder("demo", "demo").build().unwrap();
        let sink = MemorySink {
            fail_on: Some("tsconfig.json"),
            ..Default::default()
        };
        let err = generate(&options, &framework(), &sink).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));

        // Files before the failure stay written, nothing after is attempted.
        let files = sink.files.lock().unwrap();
        assert_eq!(
            files.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["package.json", "src/index.ts"]
        );
    }

    #[test]
    fn test_disk_sink_resolves_nested_paths() {
        let sink = DiskSink::new("/tmp/demo");
        assert_eq!(
            sink.resolve("src/collectors/index.ts"),
            Path::new("/tmp/demo").join("src").join("collectors").join("index.ts")
        );
        assert_eq!(sink.resolve(""), PathBuf::from("/tmp/demo"));
    }
}
