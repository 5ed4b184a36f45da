use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use evmatch_assert::{Preset, Tolerance};

#[derive(Parser)]
#[command(
    name = "evmatch",
    about = "Structural comparison of JSON events",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the differences between two JSON documents
    Diff(CompareArgs),
    /// Like diff, but print the full report and fail on any difference
    Check(CompareArgs),
    /// Show the tolerance presets and the flags they enable
    Presets,
}

#[derive(Args)]
pub struct CompareArgs {
    /// File holding the expected document
    pub expected: PathBuf,
    /// File holding the actual document
    pub actual: PathBuf,
    /// Tolerance preset (strict, default, lenient)
    #[arg(short, long)]
    pub preset: Option<Preset>,
    /// Individual tolerance flag; repeat to combine. Replaces the preset.
    #[arg(short, long = "tolerate")]
    pub tolerate: Vec<Tolerance>,
    /// TOML matcher configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
