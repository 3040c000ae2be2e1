//! Typed structs representing a locale interaction model document.
//!
//! Field names follow the document's camelCase keys. Every collection
//! defaults to empty so partially authored documents still decode.

use serde::{Deserialize, Serialize};

/// Top-level document wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionModelEnvelope {
    pub interaction_model: InteractionModel,
}

/// The interaction model of a single locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionModel {
    pub language_model: LanguageModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Dialog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<Prompt>,
}

// ── Language model ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageModel {
    #[serde(default)]
    pub invocation_name: String,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub types: Vec<SlotType>,
}

/// An intent declared in the language model section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: Vec<IntentSlot>,
    #[serde(default)]
    pub samples: Vec<String>,
}

/// A slot declared on a language model intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: String,
    #[serde(default)]
    pub samples: Vec<String>,
}

/// A slot type declaration with its values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotType {
    pub name: String,
    #[serde(default)]
    pub values: Vec<SlotTypeValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotTypeValue {
    /// Stable value id. When absent the display text stands in for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: SlotValueName,
}

/// Display text of a slot value plus its synonyms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotValueName {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

// ── Dialog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    #[serde(default)]
    pub intents: Vec<DialogIntent>,
}

/// Dialog rules for one intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogIntent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_required: Option<bool>,
    #[serde(default)]
    pub prompts: DialogIntentPrompts,
    #[serde(default)]
    pub slots: Vec<DialogSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogIntentPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

/// Dialog rules for one slot of a dialog intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogSlot {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub slot_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elicitation_required: Option<bool>,
    #[serde(default)]
    pub prompts: DialogSlotPrompts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogSlotPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elicitation: Option<String>,
}

// ── Prompts ─────────────────────────────────────────────────────────

/// A prompt and its ordered variations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    #[serde(rename = "type")]
    pub variation_type: VariationType,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VariationType {
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
}
