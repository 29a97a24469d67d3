//! Subcommand implementations.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use renamo::{
    classify_phrase_with, normalize_key, parse_comp_folder, parse_key, Feedback, FeedbackLevel,
    InstrumentTables, RenamePlan, Renamer,
};
use renamoconf::{ConfigSources, RenamoConfig};
use std::path::PathBuf;

use crate::progress::BarSink;

pub struct RenameArgs {
    pub source: PathBuf,
    pub pack_prefix: Option<String>,
    pub label: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Built-in vocabulary plus the configured aliases.
fn tables(config: &RenamoConfig) -> InstrumentTables {
    config
        .instruments
        .aliases
        .iter()
        .fold(InstrumentTables::standard(), |tables, (alias, core)| {
            tables.with_alias(alias, core)
        })
}

pub fn rename(config: &RenamoConfig, args: RenameArgs) -> Result<()> {
    let label = args.label.unwrap_or_else(|| config.naming.label.clone());
    let mut renamer = Renamer::new()
        .with_tables(tables(config))
        .with_label(label)
        .with_output_prefix(config.naming.output_prefix.clone());
    if let Some(prefix) = args.pack_prefix.or_else(|| config.naming.pack_prefix.clone()) {
        renamer = renamer.with_pack_prefix(prefix);
    }

    let plan = renamer
        .plan(&args.source)
        .with_context(|| format!("Failed to plan {}", args.source.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        print_feedback(&plan.feedback);
    }

    if args.dry_run {
        if !args.json {
            print_plan(&plan);
        }
        return Ok(());
    }

    let result = if args.json {
        renamer.execute(&plan, None)
    } else {
        let bar = BarSink::new();
        let result = renamer.execute(&plan, Some(&bar));
        bar.finish();
        result
    };
    result.with_context(|| format!("Failed to rename into {}", plan.destination_dir.display()))?;

    if !args.json {
        println!(
            "{} {} files into {}",
            "Renamed".green().bold(),
            plan.total_files(),
            plan.destination_dir.display()
        );
    }

    Ok(())
}

fn print_plan(plan: &RenamePlan) {
    println!(
        "{} {} -> {}",
        "Plan".bright_cyan().bold(),
        plan.source_dir.display(),
        plan.destination_dir.display()
    );
    for folder in &plan.folders {
        println!("{}", folder.name.bold());
        for copy in &folder.files {
            let original = copy
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("  {} -> {}", original, copy.file_name);
        }
    }
    println!("{} files, nothing written", plan.total_files());
}

fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        let badge = match item.level {
            FeedbackLevel::Warning => "WARN".yellow().bold().to_string(),
            FeedbackLevel::Info => "INFO".cyan().to_string(),
        };
        eprintln!("{} [{}] {}", badge, item.subject.dimmed(), item.message);
        if let Some(suggestion) = &item.suggestion {
            eprintln!("      {} {}", "hint:".dimmed(), suggestion);
        }
    }
}

pub fn classify(config: &RenamoConfig, phrases: &[String]) {
    let tables = tables(config);
    for phrase in phrases {
        let c = classify_phrase_with(&tables, phrase);
        let mut line = format!("{} -> {}", phrase, c.core);
        if !c.adjective.is_empty() {
            line.push_str(&format!(" ({})", c.adjective));
        }
        if c.fallback {
            line.push_str(&format!(" {}", "[unmapped]".dimmed()));
        }
        println!("{}", line);
    }
}

pub fn key(keys: &[String]) {
    for raw in keys {
        let normalized = normalize_key(raw);
        if parse_key(raw).is_some() {
            println!("{} -> {}", raw, normalized);
        } else {
            println!("{} -> {} {}", raw, normalized, "[unrecognized]".yellow());
        }
    }
}

pub fn folder(names: &[String]) {
    for name in names {
        let meta = parse_comp_folder(name);
        println!(
            "{} -> comp: {}, key: {}, tempo: {}",
            name,
            meta.comp_name,
            meta.key.as_deref().map(normalize_key).unwrap_or_else(|| "-".to_string()),
            meta.bpm.as_deref().unwrap_or("-")
        );
    }
}

pub fn show_config(config: &RenamoConfig, sources: &ConfigSources) {
    for file in &sources.files {
        eprintln!("{} {}", "loaded".dimmed(), file.display());
    }
    for var in &sources.env_overrides {
        eprintln!("{} {}", "env".dimmed(), var);
    }
    print!("{}", config.to_toml());
}
