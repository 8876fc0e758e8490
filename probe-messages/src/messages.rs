//! Registry of all user-facing message templates.
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by `msg!`.

pub struct ProbeMessages {
    // ============================================================================
    // Report
    // ============================================================================
    pub report_average: &'static str,
    pub report_target_met: &'static str,
    pub report_target_missed: &'static str,

    // ============================================================================
    // Errors and hints
    // ============================================================================
    pub error_config_load: &'static str,
    pub error_generic: &'static str,
    pub error_tool_missing: &'static str,
    pub hint_tool_missing: &'static str,
    pub hint_timeout: &'static str,
    pub warning_logging_init: &'static str,
}

pub const MESSAGES: ProbeMessages = ProbeMessages {
    // Report
    report_average: "Average container startup: {ms}ms",
    report_target_met: "✅ Performance target met (<{threshold}ms)",
    report_target_missed: "❌ Performance target missed (>{threshold}ms)",

    // Errors and hints
    error_config_load: "❌ Failed to load configuration from {path}: {error}",
    error_generic: "❌ Error: {error}",
    error_tool_missing: "❌ '{tool}' was not found in PATH",
    hint_tool_missing: "Install {tool} or pass a different target after `--`, e.g. gexec-probe -- docker run --rm alpine true",
    hint_timeout: "Raise --timeout-secs or check that '{target}' terminates on its own",
    warning_logging_init: "Failed to initialize logging: {error}",
};
