// Common test utilities and fixtures
use assert_cmd::Command;

/// A `gexec-probe` command with a clean logging environment.
pub fn probe_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gexec-probe").expect("gexec-probe binary should be built");
    cmd.env_remove("RUST_LOG")
        .env_remove("LOG_FORMAT")
        .env_remove("LOG_OUTPUT")
        .env_remove("LOG_FILE_PATH");
    cmd
}
