//! Measurement results produced by a probe run.

use serde::Serialize;
use std::fmt;

/// Elapsed wall-clock time of one invocation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Sample(pub f64);

impl Sample {
    pub fn millis(self) -> f64 {
        self.0
    }
}

/// Outcome of comparing the mean latency against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Met,
    Missed,
}

impl Verdict {
    /// A mean equal to the threshold still meets the target.
    pub fn judge(mean_ms: f64, threshold_ms: f64) -> Self {
        if mean_ms > threshold_ms {
            Verdict::Missed
        } else {
            Verdict::Met
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Met => write!(f, "met"),
            Verdict::Missed => write!(f, "missed"),
        }
    }
}

/// Descriptive statistics over the samples. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleStats {
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
}

impl SampleStats {
    pub fn compute(samples: &[Sample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut values: Vec<f64> = samples.iter().map(|s| s.0).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let len = values.len();
        let median_ms = if len % 2 == 0 {
            (values[len / 2 - 1] + values[len / 2]) / 2.0
        } else {
            values[len / 2]
        };

        Some(Self {
            min_ms: values[0],
            max_ms: values[len - 1],
            median_ms,
        })
    }
}

/// Summary of one probe run: ordered samples, their mean and the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub target: String,
    pub samples: Vec<Sample>,
    pub mean_ms: f64,
    pub threshold_ms: f64,
    pub verdict: Verdict,
    pub stats: SampleStats,
}

impl Report {
    /// Builds a report from a non-empty sample sequence.
    pub fn from_samples(target: String, samples: Vec<Sample>, threshold_ms: f64) -> Option<Self> {
        let stats = SampleStats::compute(&samples)?;
        let mean_ms = samples.iter().map(|s| s.0).sum::<f64>() / samples.len() as f64;

        Some(Self {
            target,
            verdict: Verdict::judge(mean_ms, threshold_ms),
            samples,
            mean_ms,
            threshold_ms,
            stats,
        })
    }
}
