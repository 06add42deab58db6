//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with responses, score table, and audit
    Full,
    /// Only the winning response
    Winner,
    /// JSON output
    Json,
}

/// CLI arguments for ai-council
#[derive(Parser, Debug)]
#[command(name = "ai-council")]
#[command(author, version, about = "AI Council - multiple experts answer, score, and audit")]
#[command(long_about = r#"
AI Council arbitrates a query across a panel of expert models.

The process has four phases:
1. Generation: every expert answers the query using retrieved context
2. Scoring: every expert scores every candidate against a weighted rubric
3. Audit: the evaluator inspects the scoring matrix for bias and collusion
4. Aggregation: corrected scores are averaged and a winner is selected

Configuration files are loaded from (in priority order):
1. --config <path>      Explicit config file
2. ./council.toml       Project-level config
3. ~/.config/ai-council/config.toml   Global config

Example:
  ai-council "What drives FX forward points?"
  ai-council --docs ./notes -o full "Summarize the portfolio constraints"
  ai-council --llm expert_2 --timeout 120 "Diagnostic single-scorer run"
"#)]
pub struct Cli {
    /// The query to put before the council
    pub query: Option<String>,

    /// Restrict scoring to a single scorer id or model name
    /// (diagnostic runs; all other scorers are skipped)
    #[arg(long, value_name = "SCORER")]
    pub llm: Option<String>,

    /// Per-call scoring timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Scoring worker pool size
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Directory of .txt/.md documents used as retrieval context
    #[arg(long, value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// Write structured run events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub run_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "winner")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
