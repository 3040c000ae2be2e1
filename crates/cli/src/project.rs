//! Project configuration for `skillgen generate --config skill.toml`.
//!
//! # Example
//!
//! ```toml
//! [skill]
//! namespace = "com.example.pizza"
//! name = "PizzaSkill"
//!
//! [output]
//! dir = "generated"
//! indent = 2
//!
//! [[models]]
//! locale = "en-US"
//! path = "models/en-US.json"
//!
//! [[models]]
//! path = "models/fr-FR.json"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level project file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub skill: SkillSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

/// `[skill]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillSettings {
    pub namespace: Option<String>,
    pub name: Option<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputSettings {
    pub dir: Option<PathBuf>,
    pub indent: Option<usize>,
}

/// One `[[models]]` entry. Without `locale` the file name decides.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub locale: Option<String>,
    pub path: PathBuf,
}

/// Read and parse a project file, resolving relative paths.
pub fn read_project_config(path: &Path) -> Result<ProjectConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let mut config: ProjectConfig = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for model in &mut config.models {
        model.path = resolve(base, &model.path);
    }
    if let Some(dir) = &config.output.dir {
        config.output.dir = Some(resolve(base, dir));
    }
    Ok(config)
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
