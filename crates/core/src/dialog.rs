//! Dialog normalization: a locale's dialog section into per-intent,
//! per-slot prompt data.

use crate::data::{IntentData, IntentSlotData, LocaleData, PromptVariation};
use crate::definition::{Definition, IntentDefinition};
use crate::error::{AssemblyError, PromptRole, Result};
use crate::locale::Locale;
use crate::prompts::{PromptIndex, PromptSite};
use skillgen_model::{Dialog, DialogIntent};
use std::collections::HashMap;
use tracing::debug;

/// Intent definitions a dialog section may refer to, by name.
#[derive(Debug, Clone, Default)]
pub struct KnownIntents {
    by_name: HashMap<String, IntentDefinition>,
}

impl KnownIntents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: IntentDefinition) {
        self.by_name.entry(def.name().to_string()).or_insert(def);
    }

    pub fn get(&self, name: &str) -> Option<&IntentDefinition> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<IntentDefinition> for KnownIntents {
    fn from_iter<T: IntoIterator<Item = IntentDefinition>>(iter: T) -> Self {
        let mut known = KnownIntents::new();
        for def in iter {
            known.insert(def);
        }
        known
    }
}

/// Normalize one locale's dialog section.
///
/// Every dialog intent must name a known intent and every explicit prompt
/// reference must resolve. The result has one entry per distinct intent,
/// in order of first appearance; repeated entries for an intent combine.
pub fn normalize(
    locale: &Locale,
    dialog: Option<&Dialog>,
    prompts: &PromptIndex,
    known: &KnownIntents,
) -> Result<Vec<(IntentDefinition, IntentData)>> {
    let Some(dialog) = dialog else {
        return Ok(Vec::new());
    };

    let mut results: Vec<(IntentDefinition, IntentData)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in &dialog.intents {
        let definition =
            known
                .get(&entry.name)
                .cloned()
                .ok_or_else(|| AssemblyError::UnknownDialogIntent {
                    locale: locale.to_string(),
                    intent: entry.name.clone(),
                })?;

        let data = parse_dialog_intent(entry, prompts)?;
        match positions.get(definition.name()) {
            Some(&pos) => {
                let existing = &mut results[pos].1;
                *existing = IntentData::combine(std::mem::take(existing), data);
            }
            None => {
                positions.insert(definition.name().to_string(), results.len());
                results.push((definition, data));
            }
        }
    }

    debug!(locale = %locale, count = results.len(), "normalized dialog intents");
    Ok(results)
}

/// Explicit prompt references must always resolve. The conventional
/// intent confirmation prompt is only mandatory when `confirmationRequired`
/// is true; otherwise it is picked up if present and skipped if not.
fn parse_dialog_intent(entry: &DialogIntent, prompts: &PromptIndex) -> Result<IntentData> {
    let site = PromptSite::intent_confirmation(&entry.name);
    let confirmation = match entry.prompts.confirmation.as_deref() {
        Some(id) => Some(prompts.resolve(id, site)?),
        // A required confirmation with no explicit reference must be
        // satisfiable through the conventional id.
        None if entry.confirmation_required == Some(true) => {
            Some(prompts.resolve(&site.generated_id(), site)?)
        }
        None => prompts.resolve_optional(None, site)?,
    };

    let mut data = IntentData {
        confirmation_required: entry.confirmation_required,
        confirmations: to_vec(confirmation),
        ..IntentData::default()
    };

    for slot in &entry.slots {
        let confirm_site = PromptSite::slot(&entry.name, &slot.name, PromptRole::Confirmation);
        let elicit_site = PromptSite::slot(&entry.name, &slot.name, PromptRole::Elicitation);
        let confirmation =
            prompts.resolve_optional(slot.prompts.confirmation.as_deref(), confirm_site)?;
        let elicitation =
            prompts.resolve_optional(slot.prompts.elicitation.as_deref(), elicit_site)?;

        let slot_data = IntentSlotData {
            confirmation_required: slot.confirmation_required,
            elicitation_required: slot.elicitation_required,
            confirmations: to_vec(confirmation),
            elicitations: to_vec(elicitation),
            samples: Vec::new(),
        };
        let merged = match data.slots.remove(&slot.name) {
            Some(existing) => IntentSlotData::combine(existing, slot_data),
            None => slot_data,
        };
        data.slots.insert(slot.name.clone(), merged);
    }

    Ok(data)
}

fn to_vec(variations: Option<&[PromptVariation]>) -> Vec<PromptVariation> {
    variations.map(<[PromptVariation]>::to_vec).unwrap_or_default()
}
