//! Shared model loading for `check` and `generate`.

use std::path::{Path, PathBuf};

use skillgen_core::{Assembler, Assembly, Locale, LocalizedModel};
use skillgen_model::load_model;
use tracing::info;

use crate::Failure;

/// A model document to ingest, with the locale it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelSource {
    pub locale: Locale,
    pub path: PathBuf,
}

impl ModelSource {
    /// Parse a command-line model argument: `LOCALE=PATH`, or a bare `PATH`
    /// whose file stem is the locale (`models/en-US.json`).
    pub fn from_arg(arg: &str) -> Result<ModelSource, Failure> {
        match arg.split_once('=') {
            Some((tag, path)) => Ok(ModelSource {
                locale: Locale::parse(tag)?,
                path: PathBuf::from(path),
            }),
            None => ModelSource::from_path(Path::new(arg), None),
        }
    }

    pub fn from_path(path: &Path, tag: Option<&str>) -> Result<ModelSource, Failure> {
        let locale = match tag {
            Some(tag) => Locale::parse(tag)?,
            None => Locale::from_file_name(path)?,
        };
        Ok(ModelSource {
            locale,
            path: path.to_path_buf(),
        })
    }
}

/// Load and ingest every source in order, then finalize.
///
/// Stops at the first failing locale; nothing partial is returned.
pub(crate) fn assemble(sources: &[ModelSource]) -> Result<Assembly, Failure> {
    if sources.is_empty() {
        return Err(Failure::Message("no model documents given".to_string()));
    }
    let mut assembler = Assembler::new();
    for source in sources {
        info!(locale = %source.locale, path = %source.path.display(), "loading model");
        let envelope = load_model(&source.path)?;
        assembler.ingest_model(&LocalizedModel::new(source.locale.clone(), envelope))?;
    }
    Ok(assembler.finalize())
}
