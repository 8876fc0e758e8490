//! Tracing initialization for gexec-probe.
//!
//! Configuration comes from the environment:
//! - `RUST_LOG` - standard `EnvFilter` directives (falls back to the caller's default)
//! - `LOG_FORMAT` - `human` (default), `compact` or `json`
//! - `LOG_OUTPUT` - `console` (default), `file` or `both`
//! - `LOG_FILE_PATH` - log file location for `file`/`both`, rotated daily
//!
//! Console logs are written to stderr; stdout is reserved for the report.

use std::env;
use std::path::{Path, PathBuf};

use probe_core::error::{ProbeError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Human,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Console,
        }
    }

    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: PathBuf,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup, so callers can inject values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup("LOG_FORMAT").map_or(LogFormat::Human, |v| LogFormat::parse(&v));
        let output = lookup("LOG_OUTPUT").map_or(LogOutput::Console, |v| LogOutput::parse(&v));
        let file_path = lookup("LOG_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("gexec-probe.log"));

        Self {
            format,
            output,
            file_path,
        }
    }
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Json => layer.with_ansi(false).json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Human => layer.pretty().boxed(),
    }
}

fn file_layer(settings: &LogSettings) -> (BoxedLayer, WorkerGuard) {
    let log_dir = settings
        .file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_filename = settings
        .file_path
        .file_name()
        .unwrap_or_else(|| "gexec-probe.log".as_ref());

    let appender = tracing_appender::rolling::daily(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
    let layer = match settings.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Human => layer.boxed(),
    };
    (layer, guard)
}

/// Installs the global subscriber.
///
/// `default_filter` is used when `RUST_LOG` is unset or invalid. The returned
/// guard must be held for the life of the program when file output is on,
/// otherwise buffered lines are lost.
pub fn init_subscriber(default_filter: &str) -> Result<Option<WorkerGuard>> {
    let settings = LogSettings::from_env();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if settings.output.console() {
        layers.push(console_layer(settings.format));
    }
    if settings.output.file() {
        let (layer, file_guard) = file_layer(&settings);
        layers.push(layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| ProbeError::Internal(format!("Failed to initialize tracing: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.format, LogFormat::Human);
        assert_eq!(s.output, LogOutput::Console);
        assert!(s.file_path.ends_with("gexec-probe.log"));
    }

    #[test]
    fn test_explicit_values() {
        let s = settings(&[
            ("LOG_FORMAT", "json"),
            ("LOG_OUTPUT", "both"),
            ("LOG_FILE_PATH", "/var/log/probe/run.log"),
        ]);
        assert_eq!(s.format, LogFormat::Json);
        assert_eq!(s.output, LogOutput::Both);
        assert!(s.output.console() && s.output.file());
        assert_eq!(s.file_path, PathBuf::from("/var/log/probe/run.log"));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let s = settings(&[("LOG_FORMAT", "xml"), ("LOG_OUTPUT", "syslog")]);
        assert_eq!(s.format, LogFormat::Human);
        assert_eq!(s.output, LogOutput::Console);
    }

    #[test]
    fn test_file_only_has_no_console() {
        let s = settings(&[("LOG_OUTPUT", "file")]);
        assert!(!s.output.console());
        assert!(s.output.file());
    }
}
