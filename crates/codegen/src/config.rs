//! Emission settings. Passed explicitly to every emission call; there is
//! no process-wide serializer state.

use crate::CodegenError;
use serde::{Deserialize, Serialize};

/// JSON layout of written resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationConfig {
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for SerializationConfig {
    fn default() -> Self {
        SerializationConfig { indent: 2 }
    }
}

/// Where and how resources are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    namespace: String,
    pub skill_name: Option<String>,
    pub format: SerializationConfig,
}

impl ResourceConfig {
    pub fn new(namespace: &str) -> Result<Self, CodegenError> {
        Ok(ResourceConfig {
            namespace: validate_namespace(namespace)?,
            skill_name: None,
            format: SerializationConfig::default(),
        })
    }

    pub fn with_skill_name(mut self, skill_name: impl Into<String>) -> Self {
        self.skill_name = Some(skill_name.into());
        self
    }

    pub fn with_format(mut self, format: SerializationConfig) -> Self {
        self.format = format;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `com.example.pizza` -> `com/example/pizza`.
    pub fn namespace_path(&self) -> String {
        self.namespace.replace('.', "/")
    }
}

/// A namespace is one or more identifiers joined by dots.
pub fn validate_namespace(namespace: &str) -> Result<String, CodegenError> {
    let valid = !namespace.is_empty() && namespace.split('.').all(is_identifier);
    if valid {
        Ok(namespace.to_string())
    } else {
        Err(CodegenError::InvalidNamespace(namespace.to_string()))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
