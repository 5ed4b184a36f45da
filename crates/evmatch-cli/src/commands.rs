use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use evmatch_assert::{MatchError, Matcher, MatcherConfig, Preset, StructDiff};
use serde_json::{json, Value};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
        Command::Presets => cmd_presets(&cli.format),
    }
}

fn cmd_diff(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let matcher = build_matcher(&args)?;
    let expected = load_json(&args.expected)?;
    let actual = load_json(&args.actual)?;
    let diff = matcher.diff(&expected, &actual);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff_json(&matcher, &diff))?),
        OutputFormat::Text => print_diff(&diff),
    }
    Ok(())
}

fn cmd_check(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let matcher = build_matcher(&args)?;
    let expected = load_json(&args.expected)?;
    let actual = load_json(&args.actual)?;

    match matcher.check(&expected, &actual) {
        Ok(()) => {
            match format {
                OutputFormat::Json => println!("{}", json!({"matches": true})),
                OutputFormat::Text => println!("{} Events match.", "✓".green().bold()),
            }
            Ok(())
        }
        Err(MatchError::Mismatch(mismatch)) => {
            match format {
                OutputFormat::Json => {
                    let report = json!({
                        "matches": false,
                        "tolerance": mismatch.tolerance,
                        "discrepancies": mismatch.messages(),
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => println!("{mismatch}"),
            }
            anyhow::bail!("discrepancies found: {}", mismatch.discrepancies.len())
        }
        Err(other) => Err(other.into()),
    }
}

fn cmd_presets(format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let presets: serde_json::Map<String, Value> = Preset::ALL
                .into_iter()
                .map(|p| (p.name().to_string(), json!(p.to_set())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&presets)?);
        }
        OutputFormat::Text => {
            for preset in Preset::ALL {
                println!("{:<8} {}", preset.name().bold(), preset.to_set().to_string().cyan());
            }
        }
    }
    Ok(())
}

/// Config file first, then `--preset`, then `--tolerate` flags.
fn build_matcher(args: &CompareArgs) -> anyhow::Result<Matcher> {
    let mut config = match &args.config {
        Some(path) => MatcherConfig::load(path)
            .with_context(|| format!("loading matcher config {}", path.display()))?,
        None => MatcherConfig::default(),
    };
    if let Some(preset) = args.preset {
        config.preset = Some(preset);
        config.tolerance = None;
    }
    if !args.tolerate.is_empty() {
        config.tolerance = Some(args.tolerate.iter().copied().collect());
    }
    let matcher = Matcher::from_config(&config);
    debug!(tolerance = %matcher.tolerance(), payload = %matcher.fields().payload, "matcher configured");
    Ok(matcher)
}

fn load_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    debug!(path = %path.display(), "loaded document");
    Ok(value)
}

fn diff_json(matcher: &Matcher, diff: &StructDiff) -> Value {
    json!({
        "matches": diff.is_empty(),
        "tolerance": matcher.tolerance(),
        "discrepancies": diff.discrepancies,
        "messages": diff.messages(),
    })
}

fn print_diff(diff: &StructDiff) {
    if diff.is_empty() {
        println!("{} No differences.", "✓".green().bold());
        return;
    }
    for discrepancy in diff {
        println!("  {} {}", "*".red(), discrepancy);
    }
    println!(
        "\n{} discrepancies ({} missing, {} unexpected, {} mismatched)",
        diff.len().to_string().bold(),
        diff.missing(),
        diff.unexpected(),
        diff.mismatches(),
    );
}
