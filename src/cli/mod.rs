//! CLI argument parsing for ruthscore
//!
//! A bare `ruthscore` scores the current directory with the default
//! configuration. Every flag is optional.

pub mod output;
pub mod paths;

use clap::Parser;
use std::path::PathBuf;

pub use output::OutputFormat;

/// Ruthscore - static conformance scorer for the RUTH V2 coaching agent
#[derive(Parser, Debug)]
#[command(name = "ruthscore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root the artifact paths are resolved against
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Explicit configuration file (defaults to ruthscore.toml in the root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human", value_parser = output::format_parser())]
    pub format: OutputFormat,

    /// Match constants and numbered options structurally instead of as substrings
    #[arg(long)]
    pub strict: bool,

    /// Suppress the closing pass/fail banner
    #[arg(long, short)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}
