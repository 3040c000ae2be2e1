//! skillgen-core: multi-locale interaction model assembly.
//!
//! Merges per-locale model documents into one validated model and decides
//! which entities the emission phase receives, in which order.
//!
//! # Public API
//!
//! - [`Assembler`] -- ingest locales one at a time, then [`Assembler::finalize`]
//! - [`Assembly`] -- the ordered, finished result
//! - [`AssemblyError`] -- every validation failure, all terminal
//! - [`IntentData`], [`SlotTypeData`] and the [`LocaleData`] combine laws
//! - [`Locale`], [`IntentDefinition`], [`SlotTypeDefinition`]
//!
//! The normalizers are public for callers that assemble a [`LocaleParse`]
//! themselves instead of going through [`Assembler::ingest_model`].

pub mod assembly;
pub mod data;
pub mod definition;
pub mod dialog;
pub mod error;
pub mod intents;
pub mod locale;
pub mod prompts;
pub mod slot_types;

// ── Convenience re-exports: key types ────────────────────────────────

pub use assembly::{
    Assembler, Assembly, Entry, IntentEntry, LocaleParse, LocalizedModel, SlotTypeEntry,
};
pub use data::{IntentData, IntentSlotData, LocaleData, PromptVariation, SlotTypeData, SlotValue};
pub use definition::{
    is_built_in_name, Definition, EntityId, IntentDefinition, SlotTypeDefinition,
    BUILT_IN_PREFIX,
};
pub use error::{AssemblyError, PromptRole};
pub use intents::{IntentParser, LanguageModelIntentParser, ParsedIntents};
pub use locale::Locale;
pub use prompts::{PromptIndex, PromptSite};
