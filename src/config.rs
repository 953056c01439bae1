//! Processor configuration.
//!
//! A single `ProcessorConfig` drives every backend. It can be built in code
//! through `typed-builder` or loaded from a TOML file next to the sources.

use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{CodegenError, CodegenResult};

/// Configuration for one processing run.
///
/// # Examples
///
/// ```
/// use storio_codegen::config::ProcessorConfig;
///
/// // Defaults: backend runtime path, documented output, `crate` root module
/// let config = ProcessorConfig::default();
///
/// // Point generated code at a re-exported runtime
/// let config = ProcessorConfig::builder()
///     .runtime_path("my_app::storage::sqlite")
///     .generated_docs(false)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Deserialize, Serialize)]
#[builder(doc)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Path of the runtime module generated code is written against.
    /// `None` uses the backend default (`storio::sqlite`, `storio::content_resolver`).
    #[builder(default, setter(strip_option, into))]
    pub runtime_path: Option<String>,

    /// Emit doc comments on generated items
    #[builder(default = true)]
    pub generated_docs: bool,

    /// Module path of scanned source files, used to qualify host types
    #[builder(default = String::from("crate"), setter(into))]
    pub module_path: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            runtime_path: None,
            generated_docs: true,
            module_path: String::from("crate"),
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> CodegenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CodegenResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CodegenError::Configuration(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve the runtime module path, falling back to `default`.
    pub fn runtime_path_or(&self, default: &str) -> CodegenResult<syn::Path> {
        let raw = self.runtime_path.as_deref().unwrap_or(default);
        syn::parse_str::<syn::Path>(raw).map_err(|e| {
            CodegenError::Configuration(format!("Invalid runtime path '{raw}': {e}"))
        })
    }

    /// Split `module_path` into path segments, dropping empty ones
    pub fn module_segments(&self) -> Vec<String> {
        self.module_path
            .split("::")
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
