//! skillgen-model: Locale interaction model documents.
//!
//! Provides typed structs for one locale's interaction model document
//! (language model, dialog, prompts) and the entry points that decode
//! a document from JSON text, a `serde_json::Value`, or a file.
//!
//! The engine in `skillgen-core` consumes these structures as-is; nothing
//! here validates cross references, it only checks document shape.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_json_str, from_value, load_model, ModelError};
pub use types::*;
