//! Assembly errors and the prompt roles they refer to.

use serde_json::json;

/// Role a prompt plays for an intent or slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptRole {
    Confirmation,
    Elicitation,
}

impl std::fmt::Display for PromptRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptRole::Confirmation => write!(f, "confirmation"),
            PromptRole::Elicitation => write!(f, "elicitation"),
        }
    }
}

/// An assembly error. Every variant is terminal for the current run and
/// carries the locale and entity it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    /// The same slot type name was declared twice within one locale with
    /// definitions that do not match.
    #[error("[{locale}] duplicate slot types don't have matching definitions: '{first}' does not match '{second}'")]
    DuplicateTypeMismatch {
        locale: String,
        first: String,
        second: String,
    },

    /// A dialog entry names an intent with no corresponding definition.
    #[error("[{locale}] dialog intent points to a non-existent intent: '{intent}'")]
    UnknownDialogIntent { locale: String, intent: String },

    /// A dialog entry references a prompt id that the locale does not declare.
    #[error("{}", missing_prompt_message(.locale, .intent, .slot.as_deref(), .role, .prompt_id))]
    MissingPromptReference {
        locale: String,
        intent: String,
        slot: Option<String>,
        role: PromptRole,
        prompt_id: String,
    },

    /// A locale tag is not of the `ll-RR` shape.
    #[error("invalid locale: '{tag}'")]
    MalformedLocaleTag { tag: String },

    /// Two prompts in one locale share an id but not their variations.
    #[error("[{locale}] prompt id '{id}' is declared more than once with different variations")]
    DuplicatePrompt { locale: String, id: String },

    /// Two locales (or an explicit registration and a locale) disagree on
    /// the definition behind one entity name.
    #[error("[{locale}] {kind} definition '{incoming}' conflicts with previously seen '{existing}'")]
    DefinitionMismatch {
        locale: String,
        kind: &'static str,
        existing: String,
        incoming: String,
    },
}

fn missing_prompt_message(
    locale: &str,
    intent: &str,
    slot: Option<&str>,
    role: &PromptRole,
    prompt_id: &str,
) -> String {
    match slot {
        Some(slot) => format!(
            "[{}] dialog slot '{}' of intent '{}' references missing {} prompt '{}'",
            locale, slot, intent, role, prompt_id
        ),
        None => format!(
            "[{}] dialog intent '{}' references missing {} prompt '{}'",
            locale, intent, role, prompt_id
        ),
    }
}

impl AssemblyError {
    /// Stable snake_case tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AssemblyError::DuplicateTypeMismatch { .. } => "duplicate_type_mismatch",
            AssemblyError::UnknownDialogIntent { .. } => "unknown_dialog_intent",
            AssemblyError::MissingPromptReference { .. } => "missing_prompt_reference",
            AssemblyError::MalformedLocaleTag { .. } => "malformed_locale_tag",
            AssemblyError::DuplicatePrompt { .. } => "duplicate_prompt",
            AssemblyError::DefinitionMismatch { .. } => "definition_mismatch",
        }
    }

    /// Serialize for tooling output. Always includes `kind` and `message`.
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "kind":    self.kind(),
            "message": self.to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, AssemblyError>;
