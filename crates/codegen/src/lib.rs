//! skillgen-codegen: emission of data resources for an assembled model.
//!
//! Takes the finished [`Assembly`] from `skillgen-core` and produces JSON
//! resources laid out under the configured namespace:
//!
//! - `{ns}/intents/{Intent}_{ll_RR}.json` for intents with data
//! - `{ns}/slots/{SlotType}_{ll_RR}.json` for slot types with data
//! - `{ns}/{SkillName}.json`, a manifest of the whole skill
//!
//! Planning ([`plan_resources`]) is pure; [`write_resources`] touches disk.

pub mod config;
pub mod manifest;
pub mod resources;

use skillgen_core::Assembly;
use std::fmt;
use std::path::{Path, PathBuf};

pub use config::{ResourceConfig, SerializationConfig};
pub use manifest::SkillManifest;
pub use resources::{plan_resources, write_resources, Artifact};

/// Error type for code generation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// The namespace is not a dot-separated list of identifiers.
    InvalidNamespace(String),
    /// An entity or skill name cannot be used as a file name.
    InvalidResourceName(String),
    /// An I/O error occurred while writing generated files.
    IoError(String),
    /// An artifact could not be serialized.
    EmitError(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::InvalidNamespace(ns) => write!(f, "invalid namespace: '{}'", ns),
            CodegenError::InvalidResourceName(name) => {
                write!(f, "invalid resource name: '{}'", name)
            }
            CodegenError::IoError(msg) => write!(f, "I/O error: {}", msg),
            CodegenError::EmitError(msg) => write!(f, "emit error: {}", msg),
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<serde_json::Error> for CodegenError {
    fn from(e: serde_json::Error) -> Self {
        CodegenError::EmitError(e.to_string())
    }
}

/// Plan and write every resource for `assembly` under `out_dir`.
///
/// Returns the paths written, in emission order.
pub fn generate_resources(
    assembly: &Assembly,
    config: &ResourceConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CodegenError> {
    let artifacts = plan_resources(assembly, config)?;
    write_resources(&artifacts, out_dir, &config.format)
}
