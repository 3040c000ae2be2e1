//! Integration tests for resource emission.
//!
//! Builds an assembly from two small locale documents and verifies the
//! planned artifacts and the files written to a temporary directory.

use serde_json::json;
use skillgen_codegen::{
    generate_resources, plan_resources, CodegenError, ResourceConfig, SerializationConfig,
};
use skillgen_core::{Assembler, Assembly, LocalizedModel};
use skillgen_model::from_value;
use std::fs;
use std::path::PathBuf;

fn localized(tag: &str, interaction_model: serde_json::Value) -> LocalizedModel {
    let envelope = from_value(json!({ "interactionModel": interaction_model })).expect("decode");
    LocalizedModel::from_tag(tag, envelope).expect("locale")
}

fn pizza_assembly() -> Assembly {
    let en = localized(
        "en-US",
        json!({
            "languageModel": {
                "invocationName": "pizza shop",
                "intents": [
                    { "name": "OrderIntent", "slots": [
                        { "name": "size", "type": "Size", "samples": ["a {size} pizza"] },
                        { "name": "count", "type": "AMAZON.NUMBER" }
                    ] },
                    { "name": "AMAZON.HelpIntent" },
                    { "name": "AMAZON.StopIntent" }
                ],
                "types": [ { "name": "Size", "values": [
                    { "id": "L", "name": { "value": "large", "synonyms": ["big"] } }
                ] } ]
            },
            "dialog": { "intents": [ {
                "name": "AMAZON.StopIntent",
                "confirmationRequired": true,
                "prompts": { "confirmation": "Confirm.Stop" }
            } ] },
            "prompts": [ { "id": "Confirm.Stop",
                           "variations": [ { "type": "PlainText", "value": "Are you sure?" } ] } ]
        }),
    );
    let fr = localized(
        "fr-FR",
        json!({
            "languageModel": {
                "invocationName": "pizzeria",
                "intents": [ { "name": "OrderIntent", "slots": [
                    { "name": "size", "type": "Size", "samples": ["une {size}"] }
                ] } ],
                "types": [ { "name": "Size", "values": [
                    { "id": "L", "name": { "value": "grande" } }
                ] } ]
            }
        }),
    );

    let mut assembler = Assembler::new();
    assembler.ingest_model(&en).unwrap();
    assembler.ingest_model(&fr).unwrap();
    assembler.finalize()
}

#[test]
fn plan_lists_resources_in_emission_order() {
    let assembly = pizza_assembly();
    let config = ResourceConfig::new("com.example.pizza")
        .unwrap()
        .with_skill_name("PizzaSkill");
    let artifacts = plan_resources(&assembly, &config).unwrap();
    let paths: Vec<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();

    let expected: Vec<PathBuf> = [
        "com/example/pizza/intents/OrderIntent_en_US.json",
        "com/example/pizza/intents/OrderIntent_fr_FR.json",
        "com/example/pizza/intents/AMAZON.StopIntent_en_US.json",
        "com/example/pizza/intents/AMAZON.StopIntent_fr_FR.json",
        "com/example/pizza/slots/Size_en_US.json",
        "com/example/pizza/slots/Size_fr_FR.json",
        "com/example/pizza/PizzaSkill.json",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(paths, expected);

    // locales that never mentioned an intent still get an (empty) resource
    assert_eq!(artifacts[3].contents, json!({}));
}

#[test]
fn manifest_describes_every_intent_and_eligible_slot_type() {
    let assembly = pizza_assembly();
    let config = ResourceConfig::new("pizza").unwrap().with_skill_name("PizzaSkill");
    let artifacts = plan_resources(&assembly, &config).unwrap();
    let manifest = &artifacts.last().unwrap().contents;

    assert_eq!(manifest["name"], "PizzaSkill");
    assert_eq!(manifest["locales"], json!(["en-US", "fr-FR"]));
    assert_eq!(
        manifest["invocationNames"],
        json!({ "en-US": "pizza shop", "fr-FR": "pizzeria" })
    );
    assert_eq!(
        manifest["intents"],
        json!([
            { "name": "OrderIntent", "custom": true, "resource": "intents/OrderIntent" },
            { "name": "AMAZON.HelpIntent", "custom": false },
            { "name": "AMAZON.StopIntent", "custom": false, "resource": "intents/AMAZON.StopIntent" }
        ])
    );
    assert_eq!(
        manifest["slotTypes"],
        json!([ { "name": "Size", "custom": true, "resource": "slots/Size" } ])
    );
}

#[test]
fn generate_writes_files_to_disk() {
    let assembly = pizza_assembly();
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("generated");
    let config = ResourceConfig::new("com.example.pizza")
        .unwrap()
        .with_format(SerializationConfig { indent: 4 });

    let written = generate_resources(&assembly, &config, &out).expect("generation failed");
    assert_eq!(written.len(), 6, "no manifest without a skill name");
    assert!(written.iter().all(|p| p.exists()));

    let stop = fs::read_to_string(out.join("com/example/pizza/intents/AMAZON.StopIntent_en_US.json"))
        .unwrap();
    assert!(stop.contains("\n    \"confirmationRequired\": true"));
    let stop: serde_json::Value = serde_json::from_str(&stop).unwrap();
    assert_eq!(stop["confirmations"][0]["value"], "Are you sure?");

    let size: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("com/example/pizza/slots/Size_fr_FR.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(size, json!({ "values": { "L": { "value": "grande" } } }));

    let order: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("com/example/pizza/intents/OrderIntent_en_US.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(order["slots"]["size"]["samples"], json!(["a {size} pizza"]));
    assert_eq!(order["slots"]["count"], json!({}));
}

#[test]
fn invalid_namespace_is_rejected() {
    assert_eq!(
        ResourceConfig::new("com.example-pizza"),
        Err(CodegenError::InvalidNamespace("com.example-pizza".to_string()))
    );
}
