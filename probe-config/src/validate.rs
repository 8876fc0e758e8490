use probe_core::error::{ProbeError, Result};

use crate::config::ProbeConfig;

impl ProbeConfig {
    /// Rejects configurations that cannot produce a meaningful average.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(ProbeError::Config(
                "repetitions must be at least 1".to_string(),
            ));
        }

        if !self.threshold_ms.is_finite() || self.threshold_ms < 0.0 {
            return Err(ProbeError::Config(format!(
                "threshold_ms must be a non-negative number, got {}",
                self.threshold_ms
            )));
        }

        if self.target_command.trim().is_empty() {
            return Err(ProbeError::Config(
                "target_command must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ProbeError::Config(
                "timeout_secs must be greater than zero when set".to_string(),
            ));
        }

        Ok(())
    }
}
