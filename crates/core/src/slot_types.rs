//! Slot-type normalization: raw `types` declarations of one locale into
//! definitions plus per-locale value data.

use crate::data::{LocaleData, SlotTypeData, SlotValue};
use crate::definition::{Definition, SlotTypeDefinition};
use crate::error::{AssemblyError, Result};
use crate::locale::Locale;
use skillgen_model::SlotType;
use std::collections::HashMap;
use tracing::debug;

/// Normalize one locale's slot type declarations.
///
/// Results are in declaration order, one entry per distinct type. Repeated
/// declarations of a type must derive the same definition; their values
/// are combined.
pub fn normalize(
    locale: &Locale,
    types: &[SlotType],
) -> Result<Vec<(SlotTypeDefinition, SlotTypeData)>> {
    let results = collect(
        locale,
        types.iter().map(|t| (parse_type(t), parse_data(t))),
    )?;
    debug!(locale = %locale, count = results.len(), "normalized slot types");
    Ok(results)
}

/// Group parsed declarations by exact name, keeping first-seen order.
fn collect(
    locale: &Locale,
    parsed: impl IntoIterator<Item = (SlotTypeDefinition, SlotTypeData)>,
) -> Result<Vec<(SlotTypeDefinition, SlotTypeData)>> {
    let mut results: Vec<(SlotTypeDefinition, SlotTypeData)> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (definition, data) in parsed {
        match seen.get(definition.name()) {
            Some(&pos) => {
                let (first, existing) = &mut results[pos];
                if *first != definition {
                    return Err(AssemblyError::DuplicateTypeMismatch {
                        locale: locale.to_string(),
                        first: first.to_string(),
                        second: definition.to_string(),
                    });
                }
                *existing = SlotTypeData::combine(std::mem::take(existing), data);
            }
            None => {
                seen.insert(definition.name().to_string(), results.len());
                results.push((definition, data));
            }
        }
    }
    Ok(results)
}

pub fn parse_type(slot_type: &SlotType) -> SlotTypeDefinition {
    SlotTypeDefinition::from_name(slot_type.name.as_str())
}

/// Value ids fall back to the display text only when no id is declared.
pub fn parse_data(slot_type: &SlotType) -> SlotTypeData {
    SlotTypeData::from_values(slot_type.values.iter().map(|v| {
        let id = match &v.id {
            Some(id) => id.clone(),
            None => v.name.value.clone(),
        };
        (
            id,
            SlotValue::new(v.name.value.as_str(), v.name.synonyms.clone()),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillgen_model::{SlotTypeValue, SlotValueName};

    fn value(id: Option<&str>, text: &str, synonyms: &[&str]) -> SlotTypeValue {
        SlotTypeValue {
            id: id.map(str::to_string),
            name: SlotValueName {
                value: text.to_string(),
                synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    fn slot_type(name: &str, values: Vec<SlotTypeValue>) -> SlotType {
        SlotType {
            name: name.to_string(),
            values,
        }
    }

    fn en_us() -> Locale {
        Locale::parse("en-US").unwrap()
    }

    #[test]
    fn id_falls_back_to_display_text_only_when_absent() {
        let data = parse_data(&slot_type(
            "Size",
            vec![value(Some("L"), "large", &["big"]), value(None, "small", &[])],
        ));
        let ids: Vec<_> = data.values.keys().cloned().collect();
        assert_eq!(ids, vec!["L", "small"]);
        assert_eq!(data.values["L"].value, "large");
    }

    #[test]
    fn values_sharing_display_text_merge() {
        let data = parse_data(&slot_type(
            "Size",
            vec![value(None, "large", &["big"]), value(None, "large", &["huge"])],
        ));
        assert_eq!(data.values.len(), 1);
        assert_eq!(data.values["large"].synonyms, vec!["big", "huge"]);
    }

    #[test]
    fn repeated_declarations_combine_in_declaration_order() {
        let results = normalize(
            &en_us(),
            &[
                slot_type("Size", vec![value(None, "large", &[])]),
                slot_type("AMAZON.NUMBER", vec![]),
                slot_type("Size", vec![value(None, "small", &[])]),
            ],
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.name(), "Size");
        assert!(results[0].0.is_custom());
        assert_eq!(results[0].1.values.len(), 2);
        assert!(!results[1].0.is_custom());
        assert!(results[1].1.is_empty());
    }

    #[test]
    fn names_differing_only_in_case_are_distinct_types() {
        let results = normalize(
            &en_us(),
            &[
                slot_type("Color", vec![value(None, "red", &[])]),
                slot_type("color", vec![value(None, "blue", &[])]),
            ],
        )
        .unwrap();
        let names: Vec<_> = results.iter().map(|(d, _)| d.name()).collect();
        assert_eq!(names, vec!["Color", "color"]);
        assert!(results[1].1.values.contains_key("blue"));
    }

    #[test]
    fn same_name_with_different_definitions_fails() {
        let err = collect(
            &en_us(),
            vec![
                (SlotTypeDefinition::from_name("Size"), SlotTypeData::empty()),
                (SlotTypeDefinition::new("Size", false), SlotTypeData::empty()),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::DuplicateTypeMismatch {
                locale: "en-US".into(),
                first: "Size (custom)".into(),
                second: "Size (built-in)".into(),
            }
        );
    }
}
