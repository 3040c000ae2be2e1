//! Decoding of locale model documents.
//!
//! The main entry point is [`from_json_str`]; [`load_model`] wraps it
//! with a file read so callers get the offending path in the error.

use crate::types::InteractionModelEnvelope;
use std::fmt;
use std::path::Path;

/// Errors while reading or decoding a model document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The document could not be read from disk.
    Io { path: String, message: String },
    /// The document is not a well-formed interaction model.
    Decode { message: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io { path, message } => {
                write!(f, "could not read '{}': {}", path, message)
            }
            ModelError::Decode { message } => {
                write!(f, "invalid interaction model: {}", message)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Decode {
            message: e.to_string(),
        }
    }
}

/// Decode a model document from JSON text.
pub fn from_json_str(text: &str) -> Result<InteractionModelEnvelope, ModelError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a model document from an already parsed JSON value.
pub fn from_value(value: serde_json::Value) -> Result<InteractionModelEnvelope, ModelError> {
    Ok(serde_json::from_value(value)?)
}

/// Read and decode the model document at `path`.
pub fn load_model(path: &Path) -> Result<InteractionModelEnvelope, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    from_json_str(&text).map_err(|e| match e {
        ModelError::Decode { message } => ModelError::Decode {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}
