use serde::Serialize;
use skillgen_core::{Assembly, Definition, Entry, LocaleData};

use crate::assemble::{assemble, ModelSource};
use crate::{exit_with, Failure, OutputFormat};

/// One entity in the check report.
#[derive(Debug, Serialize)]
struct EntitySummary {
    name: String,
    custom: bool,
    /// Locales that contribute non-empty data.
    locales: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    locales: Vec<String>,
    invocation_names: Vec<(String, String)>,
    intents: Vec<EntitySummary>,
    slot_types: Vec<EntitySummary>,
}

pub(crate) fn cmd_check(models: &[String], output: OutputFormat, quiet: bool) {
    let assembly = match run(models) {
        Ok(a) => a,
        Err(e) => exit_with(e, output, quiet),
    };
    if quiet {
        return;
    }

    let report = build_report(&assembly);
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&report),
    }
}

fn run(models: &[String]) -> Result<Assembly, Failure> {
    let sources = models
        .iter()
        .map(|arg| ModelSource::from_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;
    assemble(&sources)
}

fn build_report(assembly: &Assembly) -> CheckReport {
    CheckReport {
        locales: assembly.locales.iter().map(|l| l.to_string()).collect(),
        invocation_names: assembly
            .invocation_names
            .iter()
            .map(|(l, n)| (l.to_string(), n.clone()))
            .collect(),
        intents: assembly.intents.iter().map(summarize).collect(),
        slot_types: assembly.slot_types.iter().map(summarize).collect(),
    }
}

fn summarize<D: Definition, V: LocaleData>(entry: &Entry<D, V>) -> EntitySummary {
    EntitySummary {
        name: entry.definition.name().to_string(),
        custom: entry.definition.is_custom(),
        locales: entry
            .data
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(l, _)| l.to_string())
            .collect(),
    }
}

fn print_text(report: &CheckReport) {
    println!(
        "Assembled {} locale(s): {}",
        report.locales.len(),
        report.locales.join(", ")
    );
    for (locale, name) in &report.invocation_names {
        println!("  invocation name [{}]: {}", locale, name);
    }
    println!();
    println!("Intents ({}):", report.intents.len());
    for entity in &report.intents {
        print_entity(entity);
    }
    println!();
    println!("Slot types ({}):", report.slot_types.len());
    for entity in &report.slot_types {
        print_entity(entity);
    }
}

fn print_entity(entity: &EntitySummary) {
    let kind = if entity.custom { "custom" } else { "built-in" };
    if entity.locales.is_empty() {
        println!("  {} ({})", entity.name, kind);
    } else {
        println!(
            "  {} ({}) data: {}",
            entity.name,
            kind,
            entity.locales.join(", ")
        );
    }
}
