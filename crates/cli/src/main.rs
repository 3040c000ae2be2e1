mod assemble;
mod commands;
mod project;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use skillgen_codegen::CodegenError;
use skillgen_core::AssemblyError;
use skillgen_model::ModelError;
use tracing_subscriber::EnvFilter;

use commands::check::cmd_check;
use commands::generate::{cmd_generate, GenerateArgs};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Multi-locale interaction model assembler.
#[derive(Parser)]
#[command(
    name = "skillgen",
    version,
    about = "Multi-locale interaction model assembler"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble locale models and report what was found, without writing files
    Check {
        /// Model documents, as PATH (locale from file name) or LOCALE=PATH
        #[arg(required = true)]
        models: Vec<String>,
    },

    /// Assemble locale models and write data resources
    Generate {
        /// Project file (skill.toml) providing defaults for every flag
        #[arg(long)]
        config: Option<PathBuf>,
        /// Dotted namespace the resources are laid out under
        #[arg(long)]
        namespace: Option<String>,
        /// Skill name; when set a skill manifest is written as well
        #[arg(long)]
        skill_name: Option<String>,
        /// Output directory for generated files
        #[arg(long)]
        out: Option<PathBuf>,
        /// Model documents, as PATH (locale from file name) or LOCALE=PATH
        models: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check { models } => {
            cmd_check(&models, cli.output, cli.quiet);
        }
        Commands::Generate {
            config,
            namespace,
            skill_name,
            out,
            models,
        } => {
            cmd_generate(
                GenerateArgs {
                    config,
                    namespace,
                    skill_name,
                    out,
                    models,
                },
                cli.output,
                cli.quiet,
            );
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// A command failure, reported once and then exiting with status 1.
#[derive(Debug)]
pub(crate) enum Failure {
    Assembly(AssemblyError),
    Model(ModelError),
    Codegen(CodegenError),
    Message(String),
}

impl From<AssemblyError> for Failure {
    fn from(e: AssemblyError) -> Self {
        Failure::Assembly(e)
    }
}

impl From<ModelError> for Failure {
    fn from(e: ModelError) -> Self {
        Failure::Model(e)
    }
}

impl From<CodegenError> for Failure {
    fn from(e: CodegenError) -> Self {
        Failure::Codegen(e)
    }
}

impl From<String> for Failure {
    fn from(msg: String) -> Self {
        Failure::Message(msg)
    }
}

impl Failure {
    fn kind(&self) -> &'static str {
        match self {
            Failure::Assembly(e) => e.kind(),
            Failure::Model(_) => "model_error",
            Failure::Codegen(CodegenError::InvalidNamespace(_)) => "invalid_namespace",
            Failure::Codegen(_) => "codegen_error",
            Failure::Message(_) => "error",
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Assembly(e) => write!(f, "{}", e),
            Failure::Model(e) => write!(f, "{}", e),
            Failure::Codegen(e) => write!(f, "{}", e),
            Failure::Message(msg) => f.write_str(msg),
        }
    }
}

pub(crate) fn report_error(failure: &Failure, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", failure),
        OutputFormat::Json => {
            let err = serde_json::json!({
                "error": failure.to_string(),
                "kind": failure.kind(),
            });
            eprintln!("{}", err);
        }
    }
}

pub(crate) fn exit_with(failure: Failure, output: OutputFormat, quiet: bool) -> ! {
    report_error(&failure, output, quiet);
    process::exit(1);
}
