// Standard library
use std::path::Path;
use std::process::ExitCode;

// External crates
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

// Internal imports
use probe_config::{ConfigLoader, ProbeConfig};
use probe_core::command::is_tool_installed;
use probe_core::error::ProbeError;
use probe_core::{probe_error, probe_warning, Prober, Verdict};
use probe_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod output;

use cli::Args;

fn resolve_config(args: &Args, loaded: ProbeConfig) -> Result<ProbeConfig> {
    let config = loaded.apply_overrides(args.overrides());
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: &ProbeConfig) -> Result<Verdict> {
    if !is_tool_installed(&config.target_command) {
        return Err(ProbeError::Dependency(config.target_command.clone()).into());
    }

    debug!(?config, "Resolved probe configuration");
    let report = Prober::with_process(
        config.target(),
        config.repetitions,
        config.threshold_ms,
        config.timeout(),
    )
    .run()
    .with_context(|| format!("Probing '{}' failed", config.target()))?;

    output::print_report(&report, args.format)?;
    Ok(report.verdict)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    // Held until main returns so file logs are flushed.
    let _log_guard = match probe_logging::init_subscriber(default_filter) {
        Ok(guard) => guard,
        Err(e) => {
            probe_warning!("{}", msg!(MESSAGES.warning_logging_init, error = e));
            None
        }
    };

    let loaded = match ConfigLoader::new().load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            let path = args.config.as_deref().unwrap_or_else(|| Path::new("<defaults>"));
            probe_error!("{}", output::config_load_error_line(path, &e));
            return ExitCode::from(output::EXIT_PROBE_ERROR);
        }
    };

    let config = match resolve_config(&args, loaded) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e, None);
            return ExitCode::from(output::EXIT_PROBE_ERROR);
        }
    };

    info!(target_command = %config.target(), "Starting probe");
    match run(&args, &config) {
        Ok(verdict) => output::exit_code(verdict),
        Err(e) => {
            output::print_error(&e, Some(&config.target_command));
            ExitCode::from(output::EXIT_PROBE_ERROR)
        }
    }
}
