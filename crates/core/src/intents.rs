//! Upstream intent parsing: language model intents into per-locale
//! slot and sample data.
//!
//! The engine only depends on the [`IntentParser`] contract; callers with
//! their own utterance extraction plug in a different implementation.

use crate::data::{IntentData, IntentSlotData, LocaleData, SlotTypeData};
use crate::definition::{Definition, IntentDefinition, SlotTypeDefinition};
use crate::error::Result;
use crate::locale::Locale;
use skillgen_model::{Intent, LanguageModel};
use std::collections::{HashMap, HashSet};

/// Output of an intent parser for one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedIntents {
    /// One entry per distinct intent, in declaration order.
    pub intents: Vec<(IntentDefinition, IntentData)>,
    /// Slot types referenced by intent slots, with empty data.
    pub referenced_slot_types: Vec<(SlotTypeDefinition, SlotTypeData)>,
}

pub trait IntentParser {
    fn parse(&self, locale: &Locale, language_model: &LanguageModel) -> Result<ParsedIntents>;
}

/// Reads slot samples straight from the language model's intent slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageModelIntentParser;

impl IntentParser for LanguageModelIntentParser {
    fn parse(&self, _locale: &Locale, language_model: &LanguageModel) -> Result<ParsedIntents> {
        let mut out = ParsedIntents::default();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut seen_types: HashSet<String> = HashSet::new();

        for intent in &language_model.intents {
            let definition = IntentDefinition::from_name(intent.name.as_str());
            let data = parse_intent(intent);
            match positions.get(definition.name()) {
                Some(&pos) => {
                    let existing = &mut out.intents[pos].1;
                    *existing = IntentData::combine(std::mem::take(existing), data);
                }
                None => {
                    positions.insert(definition.name().to_string(), out.intents.len());
                    out.intents.push((definition, data));
                }
            }

            for slot in &intent.slots {
                if seen_types.insert(slot.slot_type.clone()) {
                    out.referenced_slot_types.push((
                        SlotTypeDefinition::from_name(slot.slot_type.as_str()),
                        SlotTypeData::empty(),
                    ));
                }
            }
        }

        Ok(out)
    }
}

fn parse_intent(intent: &Intent) -> IntentData {
    let mut data = IntentData::default();
    for slot in &intent.slots {
        let slot_data = IntentSlotData {
            samples: slot.samples.clone(),
            ..IntentSlotData::default()
        };
        let merged = match data.slots.remove(&slot.name) {
            Some(existing) => IntentSlotData::combine(existing, slot_data),
            None => slot_data,
        };
        data.slots.insert(slot.name.clone(), merged);
    }
    data
}
