//! Resource planning and writing.

use crate::config::{ResourceConfig, SerializationConfig};
use crate::manifest::SkillManifest;
use crate::CodegenError;
use serde::Serialize;
use skillgen_core::{Assembly, Definition, Entry, LocaleData};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One file to emit, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: serde_json::Value,
}

/// Decide every file to emit, in order: intent data, slot type data,
/// then the manifest when a skill name is configured.
pub fn plan_resources(
    assembly: &Assembly,
    config: &ResourceConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let root = PathBuf::from(config.namespace_path());
    let mut artifacts = Vec::new();

    for entry in &assembly.intents {
        if entry.emits_resources() {
            plan_entry(&mut artifacts, &root.join("intents"), entry, assembly)?;
        }
    }
    for entry in &assembly.slot_types {
        if entry.emits_resources() {
            plan_entry(&mut artifacts, &root.join("slots"), entry, assembly)?;
        }
    }

    if let Some(skill_name) = &config.skill_name {
        let manifest = SkillManifest::build(assembly, skill_name, config.namespace());
        artifacts.push(Artifact {
            path: root.join(format!("{}.json", file_stem(skill_name)?)),
            contents: serde_json::to_value(&manifest)?,
        });
    }

    Ok(artifacts)
}

fn plan_entry<D, V>(
    artifacts: &mut Vec<Artifact>,
    dir: &Path,
    entry: &Entry<D, V>,
    assembly: &Assembly,
) -> Result<(), CodegenError>
where
    D: Definition,
    V: LocaleData + Serialize,
{
    for locale in &assembly.locales {
        let contents = match entry.data.get(locale) {
            Some(data) => serde_json::to_value(data)?,
            None => serde_json::to_value(V::empty())?,
        };
        let file_name = format!(
            "{}_{}.json",
            file_stem(entry.definition.name())?,
            locale.file_suffix()
        );
        artifacts.push(Artifact {
            path: dir.join(file_name),
            contents,
        });
    }
    Ok(())
}

/// A name used as a file stem must stay inside its directory.
fn file_stem(name: &str) -> Result<&str, CodegenError> {
    let escapes = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if escapes {
        return Err(CodegenError::InvalidResourceName(name.to_string()));
    }
    Ok(name)
}

/// Write `artifacts` under `out_dir`, creating directories as needed.
pub fn write_resources(
    artifacts: &[Artifact],
    out_dir: &Path,
    format: &SerializationConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    make_directory(out_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = out_dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            make_directory(parent)?;
        }
        let bytes = to_pretty_bytes(&artifact.contents, format)?;
        fs::write(&path, bytes)
            .map_err(|e| CodegenError::IoError(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "wrote resource");
        written.push(path);
    }
    Ok(written)
}

fn make_directory(dir: &Path) -> Result<(), CodegenError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(CodegenError::IoError(format!(
                "path must be a directory: {}",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir)
        .map_err(|e| CodegenError::IoError(format!("{}: {}", dir.display(), e)))
}

fn to_pretty_bytes(
    value: &serde_json::Value,
    format: &SerializationConfig,
) -> Result<Vec<u8>, CodegenError> {
    let indent = vec![b' '; format.indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
