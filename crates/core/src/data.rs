//! Per-locale data bundles and their combine operators.
//!
//! An entity's data for one locale may be discovered from several sections
//! of the same document (language model slots, dialog rules) and from
//! several ingest calls, so every bundle has an associative `combine`.
//!
//! Scalar fields (`confirmation_required`, `elicitation_required`, a value's
//! display text) are first-writer-wins: the left operand's value is kept
//! whenever it is set. Those fields are therefore not commutative, and
//! callers order operands by precedence. Map keys, synonyms and samples
//! are unions and do commute. Prompt variation lists concatenate left then
//! right and keep duplicates.

use serde::Serialize;
use skillgen_model::{Variation, VariationType};
use std::collections::BTreeMap;

/// Shared behaviour of per-locale data bundles.
pub trait LocaleData: Clone + PartialEq {
    /// The empty bundle. `combine(empty(), x) == x`.
    fn empty() -> Self;
    fn is_empty(&self) -> bool;
    fn combine(a: Self, b: Self) -> Self;
}

/// One spoken or SSML rendering of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptVariation {
    #[serde(rename = "type")]
    pub variation_type: VariationType,
    pub value: String,
}

impl PromptVariation {
    pub fn plain(value: impl Into<String>) -> Self {
        PromptVariation {
            variation_type: VariationType::PlainText,
            value: value.into(),
        }
    }
}

impl From<&Variation> for PromptVariation {
    fn from(v: &Variation) -> Self {
        PromptVariation {
            variation_type: v.variation_type,
            value: v.value.clone(),
        }
    }
}

// ── Intents ─────────────────────────────────────────────────────────

/// Data for one intent in one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_required: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub confirmations: Vec<PromptVariation>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, IntentSlotData>,
}

/// Data for one slot of an intent in one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSlotData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elicitation_required: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub confirmations: Vec<PromptVariation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elicitations: Vec<PromptVariation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<String>,
}

impl LocaleData for IntentData {
    fn empty() -> Self {
        IntentData::default()
    }

    fn is_empty(&self) -> bool {
        self.confirmation_required.is_none()
            && self.confirmations.is_empty()
            && self.slots.is_empty()
    }

    fn combine(a: Self, b: Self) -> Self {
        IntentData {
            confirmation_required: a.confirmation_required.or(b.confirmation_required),
            confirmations: concat(a.confirmations, b.confirmations),
            slots: merge_maps(a.slots, b.slots, IntentSlotData::combine),
        }
    }
}

impl LocaleData for IntentSlotData {
    fn empty() -> Self {
        IntentSlotData::default()
    }

    fn is_empty(&self) -> bool {
        self.confirmation_required.is_none()
            && self.elicitation_required.is_none()
            && self.confirmations.is_empty()
            && self.elicitations.is_empty()
            && self.samples.is_empty()
    }

    fn combine(a: Self, b: Self) -> Self {
        IntentSlotData {
            confirmation_required: a.confirmation_required.or(b.confirmation_required),
            elicitation_required: a.elicitation_required.or(b.elicitation_required),
            confirmations: concat(a.confirmations, b.confirmations),
            elicitations: concat(a.elicitations, b.elicitations),
            samples: union(a.samples, b.samples),
        }
    }
}

// ── Slot types ──────────────────────────────────────────────────────

/// Values of one slot type in one locale, keyed by value id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotTypeData {
    pub values: BTreeMap<String, SlotValue>,
}

/// Display text and synonyms of one slot value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotValue {
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

impl SlotValue {
    pub fn new(value: impl Into<String>, synonyms: Vec<String>) -> Self {
        SlotValue {
            value: value.into(),
            synonyms,
        }
    }

    fn combine(a: Self, b: Self) -> Self {
        let value = if a.value.is_empty() { b.value } else { a.value };
        SlotValue {
            value,
            synonyms: union(a.synonyms, b.synonyms),
        }
    }
}

impl SlotTypeData {
    /// Build from `(id, value)` pairs; repeated ids combine.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, SlotValue)>,
    {
        let mut map: BTreeMap<String, SlotValue> = BTreeMap::new();
        for (id, value) in values {
            let merged = match map.remove(&id) {
                Some(existing) => SlotValue::combine(existing, value),
                None => value,
            };
            map.insert(id, merged);
        }
        SlotTypeData { values: map }
    }
}

impl LocaleData for SlotTypeData {
    fn empty() -> Self {
        SlotTypeData::default()
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn combine(a: Self, b: Self) -> Self {
        SlotTypeData {
            values: merge_maps(a.values, b.values, SlotValue::combine),
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn concat<T>(mut a: Vec<T>, b: Vec<T>) -> Vec<T> {
    a.extend(b);
    a
}

/// Ordered union: `a`'s order first, then unseen items of `b`.
fn union(a: Vec<String>, b: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for item in a.into_iter().chain(b) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn merge_maps<V>(
    mut a: BTreeMap<String, V>,
    b: BTreeMap<String, V>,
    combine: fn(V, V) -> V,
) -> BTreeMap<String, V> {
    for (key, right) in b {
        let merged = match a.remove(&key) {
            Some(left) => combine(left, right),
            None => right,
        };
        a.insert(key, merged);
    }
    a
}
