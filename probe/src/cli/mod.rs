// CLI argument parsing and definitions

use clap::{Parser, ValueEnum};
use probe_config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two report lines
    Human,
    /// The full report as JSON
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gexec-probe")]
#[command(about = "Measure average container startup latency and check it against a threshold")]
#[command(version)]
#[command(after_help = "Exit status: 0 target met, 1 target missed, 2 probe error")]
pub struct Args {
    /// Path to a YAML probe configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of sequential invocations [default: 5]
    #[arg(short = 'n', long)]
    pub repetitions: Option<u32>,

    /// Maximum acceptable average in milliseconds [default: 5000]
    #[arg(short = 't', long)]
    pub threshold_ms: Option<f64>,

    /// Abort an invocation that runs longer than this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Command to measure instead of `gexec echo test`
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repetitions: self.repetitions,
            threshold_ms: self.threshold_ms,
            timeout_secs: self.timeout_secs,
            target: (!self.command.is_empty()).then(|| self.command.clone()),
        }
    }
}
