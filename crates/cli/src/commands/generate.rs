use std::path::PathBuf;

use skillgen_codegen::{generate_resources, ResourceConfig, SerializationConfig};
use tracing::info;

use crate::assemble::{assemble, ModelSource};
use crate::project::{read_project_config, ProjectConfig};
use crate::{exit_with, Failure, OutputFormat};

const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Flags of `skillgen generate`. Each one overrides the project file.
#[derive(Debug, Default)]
pub(crate) struct GenerateArgs {
    pub config: Option<PathBuf>,
    pub namespace: Option<String>,
    pub skill_name: Option<String>,
    pub out: Option<PathBuf>,
    pub models: Vec<String>,
}

/// Settings after merging flags over the project file.
#[derive(Debug)]
struct Resolved {
    resources: ResourceConfig,
    out_dir: PathBuf,
    sources: Vec<ModelSource>,
}

pub(crate) fn cmd_generate(args: GenerateArgs, output: OutputFormat, quiet: bool) {
    let (out_dir, files) = match run(args) {
        Ok(r) => r,
        Err(e) => exit_with(e, output, quiet),
    };
    if quiet {
        return;
    }

    match output {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "output_dir": out_dir.display().to_string(),
                "files": files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&result).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            println!(
                "Generated {} file(s) in {}",
                files.len(),
                out_dir.display()
            );
            for file in &files {
                println!("  {}", file.display());
            }
        }
    }
}

fn run(args: GenerateArgs) -> Result<(PathBuf, Vec<PathBuf>), Failure> {
    let project = match &args.config {
        Some(path) => read_project_config(path)?,
        None => ProjectConfig::default(),
    };
    let resolved = resolve(args, project)?;

    let assembly = assemble(&resolved.sources)?;
    let files = generate_resources(&assembly, &resolved.resources, &resolved.out_dir)?;
    info!(count = files.len(), dir = %resolved.out_dir.display(), "resources written");
    Ok((resolved.out_dir, files))
}

fn resolve(args: GenerateArgs, project: ProjectConfig) -> Result<Resolved, Failure> {
    let namespace = args
        .namespace
        .or(project.skill.namespace)
        .ok_or_else(|| {
            Failure::Message("no namespace given (use --namespace or [skill] namespace)".into())
        })?;

    let mut format = SerializationConfig::default();
    if let Some(indent) = project.output.indent {
        format.indent = indent;
    }
    let mut resources = ResourceConfig::new(&namespace)?.with_format(format);
    if let Some(name) = args.skill_name.or(project.skill.name) {
        resources = resources.with_skill_name(name);
    }

    let out_dir = args
        .out
        .or(project.output.dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let sources = if args.models.is_empty() {
        project
            .models
            .iter()
            .map(|m| ModelSource::from_path(&m.path, m.locale.as_deref()))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        args.models
            .iter()
            .map(|arg| ModelSource::from_arg(arg))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Resolved {
        resources,
        out_dir,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ModelEntry, OutputSettings, SkillSettings};

    fn project() -> ProjectConfig {
        ProjectConfig {
            skill: SkillSettings {
                namespace: Some("com.example.pizza".into()),
                name: Some("PizzaSkill".into()),
            },
            output: OutputSettings {
                dir: Some(PathBuf::from("/tmp/project/out")),
                indent: Some(4),
            },
            models: vec![ModelEntry {
                locale: None,
                path: PathBuf::from("/tmp/project/en-US.json"),
            }],
        }
    }

    #[test]
    fn project_file_supplies_defaults() {
        let resolved = resolve(GenerateArgs::default(), project()).unwrap();
        assert_eq!(resolved.resources.namespace(), "com.example.pizza");
        assert_eq!(resolved.resources.skill_name.as_deref(), Some("PizzaSkill"));
        assert_eq!(resolved.resources.format.indent, 4);
        assert_eq!(resolved.out_dir, PathBuf::from("/tmp/project/out"));
        assert_eq!(resolved.sources.len(), 1);
        assert_eq!(resolved.sources[0].locale.as_tag(), "en-US");
    }

    #[test]
    fn flags_override_project_file() {
        let args = GenerateArgs {
            namespace: Some("org.other".into()),
            out: Some(PathBuf::from("elsewhere")),
            models: vec!["fr-FR=model.json".into()],
            ..GenerateArgs::default()
        };
        let resolved = resolve(args, project()).unwrap();
        assert_eq!(resolved.resources.namespace(), "org.other");
        assert_eq!(resolved.out_dir, PathBuf::from("elsewhere"));
        assert_eq!(resolved.sources[0].locale.as_tag(), "fr-FR");
    }

    #[test]
    fn missing_namespace_is_an_error() {
        let err = resolve(GenerateArgs::default(), ProjectConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("no namespace given"));
    }

    #[test]
    fn default_output_dir() {
        let args = GenerateArgs {
            namespace: Some("com.example".into()),
            ..GenerateArgs::default()
        };
        let resolved = resolve(args, ProjectConfig::default()).unwrap();
        assert_eq!(resolved.out_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(resolved.sources.is_empty());
    }
}
