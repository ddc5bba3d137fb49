//! Product configuration trait for CLI binaries
//!
//! The library never hard-codes the framework it scaffolds for. A binary implements
//! [`ProductConfig`] and the pipeline derives a [`Framework`] from it once the
//! framework version has been resolved.

/// Configuration trait for the generator binary
///
/// Defines:
/// - Product identity (name, display name)
/// - The framework package and the CLI tool it ships
/// - Registry lookup settings and the version fallback
/// - Documentation links
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the generator command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// npm package the generated code imports
    fn framework_package(&self) -> &'static str;

    /// Executable shipped by the framework package, target of the generated CLI wrapper
    fn cli_tool(&self) -> &'static str;

    /// Version written to the manifest when the registry cannot be reached
    fn fallback_version(&self) -> &'static str;

    /// Default npm registry base URL
    fn default_registry_url(&self) -> &'static str {
        "https://registry.npmjs.org"
    }

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

/// Resolved framework identity handed to the composers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    /// npm package name, e.g. `@skein/core`
    pub package: String,
    /// Concrete version, without a range operator
    pub version: String,
    /// Executable the generated CLI wrapper forwards to
    pub cli_tool: String,
    /// Name of the generator, mentioned in the generated guide
    pub generator: String,
    pub display_name: String,
    pub docs_url: String,
}

impl Framework {
    /// Build from a product config and a version obtained from a lookup
    pub fn from_config<C: ProductConfig>(config: &C, version: impl Into<String>) -> Self {
        Self {
            package: config.framework_package().to_string(),
            version: version.into(),
            cli_tool: config.cli_tool().to_string(),
            generator: config.name().to_string(),
            display_name: config.display_name().to_string(),
            docs_url: config.docs_url().to_string(),
        }
    }

    /// Caret constraint written into the manifest
    pub fn version_constraint(&self) -> String {
        format!("^{}", self.version)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Clone)]
    pub struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "create-skein"
        }

        fn display_name(&self) -> &'static str {
            "Skein"
        }

        fn framework_package(&self) -> &'static str {
            "@skein/core"
        }

        fn cli_tool(&self) -> &'static str {
            "skein"
        }

        fn fallback_version(&self) -> &'static str {
            "0.4.0"
        }

        fn registry_url_env(&self) -> &'static str {
            "SKEIN_NPM_REGISTRY"
        }

        fn docs_url(&self) -> &'static str {
            "https://skein.dev/docs"
        }

        fn cli_description(&self) -> &'static str {
            "CLI for scaffolding Skein collector applications"
        }
    }

    pub fn framework() -> Framework {
        Framework::from_config(&TestProduct, "0.4.0")
    }
}
