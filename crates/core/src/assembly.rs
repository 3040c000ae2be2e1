//! Assembly: folds per-locale normalizer output into one cross-locale
//! model and decides what the emission phase receives.
//!
//! Locales are ingested strictly one at a time. Every `ingest` works on a
//! staged copy of the accumulated state and only replaces it once the whole
//! locale has been folded in, so a failing locale leaves earlier locales
//! untouched. A failed run must still be discarded by the caller.

use crate::data::{IntentData, LocaleData, SlotTypeData};
use crate::definition::{Arena, Definition, EntityId, IntentDefinition, SlotTypeDefinition};
use crate::dialog::{self, KnownIntents};
use crate::error::Result;
use crate::intents::{IntentParser, LanguageModelIntentParser};
use crate::locale::Locale;
use crate::prompts::PromptIndex;
use crate::slot_types;
use skillgen_model::{InteractionModel, InteractionModelEnvelope};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Locale used in errors raised while registering definitions up front.
const REGISTRY_SCOPE: &str = "registry";

/// A decoded model document paired with its locale.
#[derive(Debug, Clone)]
pub struct LocalizedModel {
    pub locale: Locale,
    pub envelope: InteractionModelEnvelope,
}

impl LocalizedModel {
    pub fn new(locale: Locale, envelope: InteractionModelEnvelope) -> Self {
        LocalizedModel { locale, envelope }
    }

    /// Pair a document with a raw locale tag, rejecting malformed tags.
    pub fn from_tag(tag: &str, envelope: InteractionModelEnvelope) -> Result<Self> {
        Ok(LocalizedModel::new(Locale::parse(tag)?, envelope))
    }

    pub fn model(&self) -> &InteractionModel {
        &self.envelope.interaction_model
    }
}

/// Everything one locale contributes, already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleParse {
    pub invocation_name: String,
    pub slot_types: Vec<(SlotTypeDefinition, SlotTypeData)>,
    pub intents: Vec<(IntentDefinition, IntentData)>,
}

/// A definition with its data for every ingested locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<D, V> {
    pub definition: D,
    pub data: BTreeMap<Locale, V>,
}

pub type IntentEntry = Entry<IntentDefinition, IntentData>;
pub type SlotTypeEntry = Entry<SlotTypeDefinition, SlotTypeData>;

impl<D: Definition, V: LocaleData> Entry<D, V> {
    /// True when at least one locale has non-empty data.
    pub fn has_data(&self) -> bool {
        self.data.values().any(|v| !v.is_empty())
    }

    /// Custom entities are always emitted; built-in ones only with data.
    pub fn is_eligible(&self) -> bool {
        self.definition.is_custom() || self.has_data()
    }

    /// Whether per-locale data resources are written for this entity.
    pub fn emits_resources(&self) -> bool {
        self.has_data()
    }
}

/// The finished, ordered result of an assembly run.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Ingested locales, in first-ingest order.
    pub locales: Vec<Locale>,
    /// Every intent, in first-discovery order.
    pub intents: Vec<IntentEntry>,
    /// Eligible slot types, in first-discovery order.
    pub slot_types: Vec<SlotTypeEntry>,
    pub invocation_names: BTreeMap<Locale, String>,
}

#[derive(Debug, Clone, Default)]
struct State {
    locales: Vec<Locale>,
    invocation_names: BTreeMap<Locale, String>,
    intents: Arena<IntentDefinition>,
    intent_data: Vec<BTreeMap<Locale, IntentData>>,
    slot_types: Arena<SlotTypeDefinition>,
    slot_type_data: Vec<BTreeMap<Locale, SlotTypeData>>,
}

/// Accumulates locales into a single multi-locale model.
pub struct Assembler {
    intent_parser: Box<dyn IntentParser>,
    state: State,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::with_intent_parser(Box::new(LanguageModelIntentParser))
    }

    pub fn with_intent_parser(intent_parser: Box<dyn IntentParser>) -> Self {
        Assembler {
            intent_parser,
            state: State::default(),
        }
    }

    /// Register an intent ahead of any locale. Registered intents take the
    /// earliest discovery positions and are visible to every dialog section.
    pub fn register_intent(&mut self, def: IntentDefinition) -> Result<()> {
        let id = self.state.intents.intern(def, REGISTRY_SCOPE)?;
        ensure_slot(&mut self.state.intent_data, id.index());
        Ok(())
    }

    /// Register a slot type ahead of any locale.
    pub fn register_slot_type(&mut self, def: SlotTypeDefinition) -> Result<()> {
        let id = self.state.slot_types.intern(def, REGISTRY_SCOPE)?;
        ensure_slot(&mut self.state.slot_type_data, id.index());
        Ok(())
    }

    /// Normalize one locale's document and fold it in.
    pub fn ingest_model(&mut self, model: &LocalizedModel) -> Result<()> {
        let locale = &model.locale;
        let im = model.model();
        let language_model = &im.language_model;

        let mut slot_types = slot_types::normalize(locale, &language_model.types)?;
        let parsed = self.intent_parser.parse(locale, language_model)?;
        slot_types.extend(parsed.referenced_slot_types);

        let prompts = PromptIndex::build(locale, &im.prompts)?;
        let known: KnownIntents = self
            .state
            .intents
            .iter()
            .map(|(_, d)| d.clone())
            .chain(parsed.intents.iter().map(|(d, _)| d.clone()))
            .collect();
        let dialog_intents = dialog::normalize(locale, im.dialog.as_ref(), &prompts, &known)?;

        let mut intents = parsed.intents;
        intents.extend(dialog_intents);

        self.ingest(
            locale,
            LocaleParse {
                invocation_name: language_model.invocation_name.clone(),
                slot_types,
                intents,
            },
        )
    }

    /// Fold one locale's normalized output into the accumulated state.
    ///
    /// Data already recorded for the same entity and locale is combined with
    /// the incoming value, existing value first, so earlier contributions
    /// win scalar ties. Incoming data equal to the stored value is a no-op.
    pub fn ingest(&mut self, locale: &Locale, parse: LocaleParse) -> Result<()> {
        let mut staged = self.state.clone();

        if !staged.locales.contains(locale) {
            staged.locales.push(locale.clone());
        }
        staged
            .invocation_names
            .insert(locale.clone(), parse.invocation_name);

        let slot_type_count = parse.slot_types.len();
        let intent_count = parse.intents.len();

        fold(
            &mut staged.slot_types,
            &mut staged.slot_type_data,
            locale,
            parse.slot_types,
        )?;
        fold(&mut staged.intents, &mut staged.intent_data, locale, parse.intents)?;

        self.state = staged;
        info!(
            locale = %locale,
            slot_types = slot_type_count,
            intents = intent_count,
            "ingested locale"
        );
        Ok(())
    }

    /// Produce the ordered result, filling locales an entity never saw with
    /// empty data and dropping built-in slot types no locale gave data to.
    pub fn finalize(self) -> Assembly {
        let State {
            locales,
            invocation_names,
            intents,
            intent_data,
            slot_types,
            slot_type_data,
        } = self.state;

        let intents: Vec<IntentEntry> = entries(&intents, intent_data, &locales).collect();
        let slot_types: Vec<SlotTypeEntry> = entries(&slot_types, slot_type_data, &locales)
            .filter(|entry| {
                let keep = entry.is_eligible();
                if !keep {
                    debug!(
                        slot_type = entry.definition.name(),
                        "skipping built-in slot type without data"
                    );
                }
                keep
            })
            .collect();

        info!(
            locales = locales.len(),
            intents = intents.len(),
            slot_types = slot_types.len(),
            "assembly finalized"
        );

        Assembly {
            locales,
            intents,
            slot_types,
            invocation_names,
        }
    }
}

fn ensure_slot<V>(data: &mut Vec<BTreeMap<Locale, V>>, index: usize) {
    while data.len() <= index {
        data.push(BTreeMap::new());
    }
}

/// Fold one locale's contribution for every entity of one kind.
///
/// Entries naming the same entity are combined first, so the equality
/// check against stored data sees the whole per-locale value.
fn fold<D: Definition, V: LocaleData>(
    arena: &mut Arena<D>,
    data: &mut Vec<BTreeMap<Locale, V>>,
    locale: &Locale,
    items: Vec<(D, V)>,
) -> Result<()> {
    let mut grouped: Vec<(EntityId, V)> = Vec::new();
    for (def, value) in items {
        let id = arena.intern(def, locale.as_tag())?;
        match grouped.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, existing)) => {
                let left = std::mem::replace(existing, V::empty());
                *existing = V::combine(left, value);
            }
            None => grouped.push((id, value)),
        }
    }

    for (id, value) in grouped {
        ensure_slot(data, id.index());
        let per_locale = &mut data[id.index()];
        let merged = match per_locale.remove(locale) {
            Some(existing) if existing == value => existing,
            Some(existing) => V::combine(existing, value),
            None => value,
        };
        per_locale.insert(locale.clone(), merged);
    }
    Ok(())
}

fn entries<'a, D: Definition + 'a, V: LocaleData + 'a>(
    arena: &'a Arena<D>,
    data: Vec<BTreeMap<Locale, V>>,
    locales: &'a [Locale],
) -> impl Iterator<Item = Entry<D, V>> + 'a {
    arena
        .iter()
        .zip(data)
        .map(move |((_, definition), mut per_locale)| {
            for locale in locales {
                per_locale.entry(locale.clone()).or_insert_with(V::empty);
            }
            Entry {
                definition: definition.clone(),
                data: per_locale,
            }
        })
}
