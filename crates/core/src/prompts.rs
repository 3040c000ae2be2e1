//! Reference resolution: dialog prompt ids to prompt content.

use crate::data::PromptVariation;
use crate::error::{AssemblyError, PromptRole, Result};
use crate::locale::Locale;
use skillgen_model::Prompt;
use std::collections::HashMap;

/// Where a prompt reference occurs in a dialog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSite<'a> {
    pub intent: &'a str,
    pub slot: Option<&'a str>,
    pub role: PromptRole,
}

impl<'a> PromptSite<'a> {
    pub fn intent_confirmation(intent: &'a str) -> Self {
        PromptSite {
            intent,
            slot: None,
            role: PromptRole::Confirmation,
        }
    }

    pub fn slot(intent: &'a str, slot: &'a str, role: PromptRole) -> Self {
        PromptSite {
            intent,
            slot: Some(slot),
            role,
        }
    }

    /// The conventional prompt id for this site, e.g.
    /// `Elicit.Intent-OrderIntent.IntentSlot-size`.
    pub fn generated_id(&self) -> String {
        let verb = match self.role {
            PromptRole::Confirmation => "Confirm",
            PromptRole::Elicitation => "Elicit",
        };
        match self.slot {
            Some(slot) => format!("{}.Intent-{}.IntentSlot-{}", verb, self.intent, slot),
            None => format!("{}.Intent-{}", verb, self.intent),
        }
    }
}

/// One locale's prompts, indexed by id.
#[derive(Debug, Clone)]
pub struct PromptIndex {
    locale: Locale,
    prompts: HashMap<String, Vec<PromptVariation>>,
}

impl PromptIndex {
    /// Index `prompts`. A repeated id is accepted only if its variations are
    /// identical to the first declaration.
    pub fn build(locale: &Locale, prompts: &[Prompt]) -> Result<PromptIndex> {
        let mut index: HashMap<String, Vec<PromptVariation>> = HashMap::new();
        for prompt in prompts {
            let variations: Vec<PromptVariation> =
                prompt.variations.iter().map(PromptVariation::from).collect();
            if let Some(existing) = index.get(&prompt.id) {
                if *existing != variations {
                    return Err(AssemblyError::DuplicatePrompt {
                        locale: locale.to_string(),
                        id: prompt.id.clone(),
                    });
                }
                continue;
            }
            index.insert(prompt.id.clone(), variations);
        }
        Ok(PromptIndex {
            locale: locale.clone(),
            prompts: index,
        })
    }

    pub fn get(&self, id: &str) -> Option<&[PromptVariation]> {
        self.prompts.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Resolve an id that must exist.
    pub fn resolve(&self, id: &str, site: PromptSite<'_>) -> Result<&[PromptVariation]> {
        self.get(id).ok_or_else(|| AssemblyError::MissingPromptReference {
            locale: self.locale.to_string(),
            intent: site.intent.to_string(),
            slot: site.slot.map(str::to_string),
            role: site.role,
            prompt_id: id.to_string(),
        })
    }

    /// Resolve an optional reference. An explicit id must exist; without
    /// one, the conventional id for `site` is used if the locale declares it.
    pub fn resolve_optional(
        &self,
        explicit: Option<&str>,
        site: PromptSite<'_>,
    ) -> Result<Option<&[PromptVariation]>> {
        match explicit {
            Some(id) => self.resolve(id, site).map(Some),
            None => Ok(self.get(&site.generated_id())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillgen_model::{Variation, VariationType};

    fn prompt(id: &str, texts: &[&str]) -> Prompt {
        Prompt {
            id: id.to_string(),
            variations: texts
                .iter()
                .map(|t| Variation {
                    variation_type: VariationType::PlainText,
                    value: t.to_string(),
                })
                .collect(),
        }
    }

    fn en_us() -> Locale {
        Locale::parse("en-US").unwrap()
    }

    #[test]
    fn generated_ids_follow_convention() {
        assert_eq!(
            PromptSite::intent_confirmation("OrderIntent").generated_id(),
            "Confirm.Intent-OrderIntent"
        );
        assert_eq!(
            PromptSite::slot("OrderIntent", "size", PromptRole::Elicitation).generated_id(),
            "Elicit.Intent-OrderIntent.IntentSlot-size"
        );
        assert_eq!(
            PromptSite::slot("OrderIntent", "size", PromptRole::Confirmation).generated_id(),
            "Confirm.Intent-OrderIntent.IntentSlot-size"
        );
    }

    #[test]
    fn identical_duplicates_collapse() {
        let index = PromptIndex::build(
            &en_us(),
            &[prompt("a", &["one"]), prompt("a", &["one"]), prompt("b", &[])],
        )
        .unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn conflicting_duplicates_fail() {
        let err = PromptIndex::build(&en_us(), &[prompt("a", &["one"]), prompt("a", &["two"])])
            .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::DuplicatePrompt {
                locale: "en-US".into(),
                id: "a".into()
            }
        );
    }

    #[test]
    fn resolve_reports_full_context() {
        let index = PromptIndex::build(&en_us(), &[]).unwrap();
        let site = PromptSite::slot("OrderIntent", "size", PromptRole::Confirmation);
        let err = index.resolve("X.confirm", site).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::MissingPromptReference {
                locale: "en-US".into(),
                intent: "OrderIntent".into(),
                slot: Some("size".into()),
                role: PromptRole::Confirmation,
                prompt_id: "X.confirm".into(),
            }
        );
    }

    #[test]
    fn optional_reference_falls_back_to_generated_id() {
        let index = PromptIndex::build(
            &en_us(),
            &[prompt("Elicit.Intent-OrderIntent.IntentSlot-size", &["Which size?"])],
        )
        .unwrap();
        let elicit = PromptSite::slot("OrderIntent", "size", PromptRole::Elicitation);
        let found = index.resolve_optional(None, elicit).unwrap().unwrap();
        assert_eq!(found[0].value, "Which size?");

        let confirm = PromptSite::slot("OrderIntent", "size", PromptRole::Confirmation);
        assert!(index.resolve_optional(None, confirm).unwrap().is_none());
        assert!(index.resolve_optional(Some("nope"), confirm).is_err());
    }
}
