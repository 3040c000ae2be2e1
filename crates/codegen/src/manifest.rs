//! Language-neutral description of the assembled skill.

use serde::Serialize;
use skillgen_core::{Assembly, Definition, Entry, LocaleData};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillManifest {
    pub name: String,
    pub namespace: String,
    pub locales: Vec<String>,
    pub invocation_names: BTreeMap<String, String>,
    pub intents: Vec<ManifestEntry>,
    pub slot_types: Vec<ManifestEntry>,
}

/// One intent or slot type. `resource` is the base name of its per-locale
/// data files relative to the namespace directory, if any were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl SkillManifest {
    pub fn build(assembly: &Assembly, name: &str, namespace: &str) -> Self {
        SkillManifest {
            name: name.to_string(),
            namespace: namespace.to_string(),
            locales: assembly
                .locales
                .iter()
                .map(|l| l.as_tag().to_string())
                .collect(),
            invocation_names: assembly
                .invocation_names
                .iter()
                .map(|(l, n)| (l.as_tag().to_string(), n.clone()))
                .collect(),
            intents: assembly
                .intents
                .iter()
                .map(|e| manifest_entry(e, "intents"))
                .collect(),
            slot_types: assembly
                .slot_types
                .iter()
                .map(|e| manifest_entry(e, "slots"))
                .collect(),
        }
    }
}

fn manifest_entry<D: Definition, V: LocaleData>(entry: &Entry<D, V>, dir: &str) -> ManifestEntry {
    ManifestEntry {
        name: entry.definition.name().to_string(),
        custom: entry.definition.is_custom(),
        resource: entry
            .emits_resources()
            .then(|| format!("{}/{}", dir, entry.definition.name())),
    }
}
