//! Rendering of reports and errors.

use std::path::Path;
use std::process::ExitCode;

use probe_core::error::{ProbeError, Result};
use probe_core::{probe_error, probe_error_hint, probe_println, Report, Verdict};
use probe_messages::{msg, MESSAGES};

use crate::cli::OutputFormat;

pub const EXIT_TARGET_MET: u8 = 0;
pub const EXIT_TARGET_MISSED: u8 = 1;
pub const EXIT_PROBE_ERROR: u8 = 2;

pub fn exit_status(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Met => EXIT_TARGET_MET,
        Verdict::Missed => EXIT_TARGET_MISSED,
    }
}

pub fn exit_code(verdict: Verdict) -> ExitCode {
    ExitCode::from(exit_status(verdict))
}

/// The human-readable report, one entry per output line.
pub fn report_lines(report: &Report) -> Vec<String> {
    let verdict_line = match report.verdict {
        Verdict::Met => msg!(MESSAGES.report_target_met, threshold = report.threshold_ms),
        Verdict::Missed => msg!(MESSAGES.report_target_missed, threshold = report.threshold_ms),
    };
    vec![
        msg!(
            MESSAGES.report_average,
            ms = format_args!("{:.0}", report.mean_ms)
        ),
        verdict_line,
    ]
}

pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for line in report_lines(report) {
                probe_println!("{}", line);
            }
        }
        OutputFormat::Json => {
            probe_println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

pub fn config_load_error_line(path: &Path, error: &ProbeError) -> String {
    msg!(MESSAGES.error_config_load, path = path.display(), error = error)
}

/// Prints a top-level failure with a hint for the errors users can fix.
pub fn print_error(error: &anyhow::Error, target: Option<&str>) {
    match (error.downcast_ref::<ProbeError>(), target) {
        (Some(ProbeError::Dependency(_)), Some(tool)) => {
            probe_error!("{}", msg!(MESSAGES.error_tool_missing, tool = tool));
            probe_error_hint!("{}", msg!(MESSAGES.hint_tool_missing, tool = tool));
        }
        (Some(ProbeError::Timeout(_)), _) => {
            probe_error!("{}", msg!(MESSAGES.error_generic, error = format_args!("{:#}", error)));
            if let Some(target) = target {
                probe_error_hint!("{}", msg!(MESSAGES.hint_timeout, target = target));
            }
        }
        _ => {
            probe_error!("{}", msg!(MESSAGES.error_generic, error = format_args!("{:#}", error)));
        }
    }
}
