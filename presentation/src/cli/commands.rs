//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a judged submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report: header, optional prelude and the judge's synthesis
    Report,
    /// Only the judge's synthesized text
    Judge,
    /// JSON output
    Json,
}

impl From<OutputFormat> for godel_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Report => godel_domain::OutputFormat::Report,
            OutputFormat::Judge => godel_domain::OutputFormat::Judge,
            OutputFormat::Json => godel_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for godel-judge
#[derive(Parser, Debug)]
#[command(name = "godel-judge")]
#[command(author, version, about = "Several models answer, one model judges soundness and completeness")]
#[command(long_about = r#"
Gödel Judge sends a prompt to several worker models in parallel, then asks a
judge model to evaluate their answers for soundness (where a majority agrees)
and completeness (where answers complement each other).

The judge only runs when enough workers answered in time:
2 of 3 workers, 4 of 5 workers, otherwise half rounded up.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./godel.toml        Project-level config
3. ~/.config/godel-judge/config.toml   Global config

Example:
  godel-judge "Is the halting problem decidable for finite-state machines?"
  godel-judge --judge claude -w gpt -w grok -w kimi "Explain CAP"
  godel-judge -n 5 --extended --attach src/main.rs "Review this program"
"#)]
pub struct Cli {
    /// The prompt to send to the workers
    pub prompt: Option<String>,

    /// Judge model key (see --list-models)
    #[arg(short, long, value_name = "MODEL")]
    pub judge: Option<String>,

    /// Worker model keys (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub worker: Vec<String>,

    /// Number of workers
    #[arg(short = 'n', long, value_name = "N")]
    pub worker_count: Option<usize>,

    /// Include the prompts and every raw worker answer in the report
    #[arg(short, long)]
    pub extended: bool,

    /// Attach a text file to the prompt (can be specified multiple times)
    #[arg(short, long, value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Save the report as a markdown file
    #[arg(short, long)]
    pub save: bool,

    /// Directory for saved reports
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Per-worker deadline in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Deadline for the judge in seconds (unbounded by default)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub judge_timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List past submissions, newest first, and exit
    #[arg(long, conflicts_with = "clear_history")]
    pub history: bool,

    /// Print the full report of a past submission (1 = newest) and exit
    #[arg(long, value_name = "N", conflicts_with = "clear_history")]
    pub history_entry: Option<usize>,

    /// Delete all past submissions and exit
    #[arg(long)]
    pub clear_history: bool,

    /// List the available models and exit
    #[arg(long)]
    pub list_models: bool,
}

impl Cli {
    /// True when the invocation only inspects state and sends no prompt
    pub fn is_informational(&self) -> bool {
        self.show_config
            || self.history
            || self.history_entry.is_some()
            || self.clear_history
            || self.list_models
    }
}
