//! Intent and slot type definitions, and the arena that gives each
//! distinct definition a stable id at first discovery.

use crate::error::{AssemblyError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Names with this prefix belong to the platform; everything else is
/// author-defined.
pub const BUILT_IN_PREFIX: &str = "AMAZON.";

pub fn is_built_in_name(name: &str) -> bool {
    name.starts_with(BUILT_IN_PREFIX)
}

/// Common surface of intent and slot type definitions.
pub trait Definition: Clone + PartialEq + fmt::Display {
    /// Human-readable kind used in error messages.
    const KIND: &'static str;

    fn name(&self) -> &str;
    fn is_custom(&self) -> bool;
}

/// An intent, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IntentDefinition {
    name: String,
    custom: bool,
}

impl IntentDefinition {
    pub fn new(name: impl Into<String>, custom: bool) -> Self {
        IntentDefinition {
            name: name.into(),
            custom,
        }
    }

    /// Derive the custom flag from the platform naming convention.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let custom = !is_built_in_name(&name);
        IntentDefinition { name, custom }
    }
}

impl Definition for IntentDefinition {
    const KIND: &'static str = "intent";

    fn name(&self) -> &str {
        &self.name
    }

    fn is_custom(&self) -> bool {
        self.custom
    }
}

impl fmt::Display for IntentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_definition(f, &self.name, self.custom)
    }
}

/// A slot type, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SlotTypeDefinition {
    name: String,
    custom: bool,
}

impl SlotTypeDefinition {
    pub fn new(name: impl Into<String>, custom: bool) -> Self {
        SlotTypeDefinition {
            name: name.into(),
            custom,
        }
    }

    /// Derive the custom flag from the platform naming convention.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let custom = !is_built_in_name(&name);
        SlotTypeDefinition { name, custom }
    }
}

impl Definition for SlotTypeDefinition {
    const KIND: &'static str = "slot type";

    fn name(&self) -> &str {
        &self.name
    }

    fn is_custom(&self) -> bool {
        self.custom
    }
}

impl fmt::Display for SlotTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_definition(f, &self.name, self.custom)
    }
}

fn write_definition(f: &mut fmt::Formatter<'_>, name: &str, custom: bool) -> fmt::Result {
    if custom {
        write!(f, "{} (custom)", name)
    } else {
        write!(f, "{} (built-in)", name)
    }
}

/// Stable synthetic id, assigned in first-discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Definitions in first-discovery order, with name lookup.
#[derive(Debug, Clone)]
pub struct Arena<D> {
    entries: Vec<D>,
    by_name: HashMap<String, EntityId>,
}

impl<D> Default for Arena<D> {
    fn default() -> Self {
        Arena {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<D: Definition> Arena<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `def`, assigning the next id if it is new.
    ///
    /// A definition whose name is already known but which differs from the
    /// stored definition is rejected rather than resolved either way.
    pub fn intern(&mut self, def: D, locale: &str) -> Result<EntityId> {
        if let Some(&id) = self.by_name.get(def.name()) {
            let existing = &self.entries[id.0];
            if *existing != def {
                return Err(AssemblyError::DefinitionMismatch {
                    locale: locale.to_string(),
                    kind: D::KIND,
                    existing: existing.to_string(),
                    incoming: def.to_string(),
                });
            }
            return Ok(id);
        }
        let id = EntityId(self.entries.len());
        self.by_name.insert(def.name().to_string(), id);
        self.entries.push(def);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: EntityId) -> &D {
        &self.entries[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &D)> {
        self.entries.iter().enumerate().map(|(i, d)| (EntityId(i), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
