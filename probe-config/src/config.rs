//! Probe configuration.
//!
//! Every field has a default equal to the classic startup benchmark: run
//! `gexec echo test` five times and require an average of at most 5000 ms.

use std::time::Duration;

use probe_core::TargetCommand;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPETITIONS: u32 = 5;
pub const DEFAULT_THRESHOLD_MS: f64 = 5000.0;
pub const DEFAULT_TARGET_COMMAND: &str = "gexec";
// Two argv entries; scripts/performance-test.py passed the single entry "echo test".
pub const DEFAULT_TARGET_ARGS: [&str; 2] = ["echo", "test"];

fn default_repetitions() -> u32 {
    DEFAULT_REPETITIONS
}

fn default_threshold_ms() -> f64 {
    DEFAULT_THRESHOLD_MS
}

fn default_target_command() -> String {
    DEFAULT_TARGET_COMMAND.to_string()
}

fn default_target_args() -> Vec<String> {
    DEFAULT_TARGET_ARGS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Number of sequential invocations.
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    /// Maximum acceptable mean latency in milliseconds (inclusive).
    #[serde(default = "default_threshold_ms")]
    pub threshold_ms: f64,

    /// Program to invoke.
    #[serde(default = "default_target_command")]
    pub target_command: String,

    /// Arguments passed to the program.
    #[serde(default = "default_target_args")]
    pub target_args: Vec<String>,

    /// Per-invocation limit; unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            threshold_ms: default_threshold_ms(),
            target_command: default_target_command(),
            target_args: default_target_args(),
            timeout_secs: None,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub repetitions: Option<u32>,
    pub threshold_ms: Option<f64>,
    pub timeout_secs: Option<u64>,
    /// Program followed by its arguments.
    pub target: Option<Vec<String>>,
}

impl ProbeConfig {
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(repetitions) = overrides.repetitions {
            self.repetitions = repetitions;
        }
        if let Some(threshold_ms) = overrides.threshold_ms {
            self.threshold_ms = threshold_ms;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
        if let Some(mut target) = overrides.target.filter(|t| !t.is_empty()) {
            self.target_command = target.remove(0);
            self.target_args = target;
        }
        self
    }

    pub fn target(&self) -> TargetCommand {
        TargetCommand::new(self.target_command.clone(), self.target_args.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
