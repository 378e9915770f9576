//! CLI argument definitions for the deck generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "cgmf-uq",
    version,
    about = "Generate perturbed CGMF input decks for uncertainty sweeps",
    long_about = "Copy a baseline CGMF input directory and rewrite its model\n\
                  parameter files with configured scale factors, preserving the\n\
                  byte layout of every untouched line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy a baseline deck and perturb its parameter files.
    Generate(GenerateArgs),

    /// Check a sweep manifest for duplicate tasks and missing config files.
    ValidateManifest(ValidateManifestArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory to write the perturbed deck into.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Baseline CGMF input directory to copy from.
    #[arg(long = "source-dir", value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Target nuclide ZAID (Z*1000 + A, negative for spontaneous fission).
    #[arg(long = "target", value_name = "ZAID", allow_hyphen_values = true)]
    pub target: i32,

    /// Scale-factor JSON file (identity configuration when omitted).
    #[arg(long = "scales", value_name = "FILE")]
    pub scales: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateManifestArgs {
    /// Path to the sweep manifest CSV.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
