// Standard library
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Output;
use std::thread;
use std::time::{Duration, Instant};

// External crates
use crate::error::{ProbeError, Result};
use duct::cmd;
use tracing::{debug, warn};
use which::which;

/// How often a timed invocation checks whether the child has exited.
/// Kept small because the wait is part of the measured interval.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Number of trailing stderr lines included in a failure report.
const ERROR_CONTEXT_LINES: usize = 20;

fn describe<A: AsRef<OsStr>>(program: &str, args: &[A]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error(program: &str, full_command: &str, err: std::io::Error) -> ProbeError {
    if err.kind() == ErrorKind::NotFound {
        ProbeError::Dependency(format!("'{}' (while running: {})", program, full_command))
    } else {
        ProbeError::Command(format!("failed to start '{}': {}", full_command, err))
    }
}

fn check_status(full_command: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = &lines[lines.len().saturating_sub(ERROR_CONTEXT_LINES)..];

    let mut message = format!(
        "'{}' exited with status {}",
        full_command,
        output
            .status
            .code()
            .map_or_else(|| "unknown (terminated by signal)".to_string(), |c| c.to_string())
    );
    if !tail.is_empty() {
        message.push_str(&format!("\n\nStderr (last {} lines):\n{}", tail.len(), tail.join("\n")));
    }
    Err(ProbeError::Command(message))
}

#[cfg(unix)]
fn in_own_process_group(expression: duct::Expression) -> duct::Expression {
    use std::os::unix::process::CommandExt;
    expression.before_spawn(|command| {
        command.process_group(0);
        Ok(())
    })
}

#[cfg(not(unix))]
fn in_own_process_group(expression: duct::Expression) -> duct::Expression {
    expression
}

/// Kills every process in the groups led by the handle's children.
#[cfg(unix)]
fn kill_process_groups(handle: &duct::Handle) -> std::result::Result<(), nix::Error> {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    for pid in handle.pids() {
        match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn kill_process_groups(_handle: &duct::Handle) -> std::result::Result<(), std::io::Error> {
    Ok(())
}

/// Run a command to completion with stdout and stderr captured and discarded.
///
/// Without a timeout this blocks until the child exits. With a timeout the
/// child is polled and killed once the deadline passes. On unix a timed
/// child runs in its own process group, and the whole group is killed, so
/// processes it forked do not outlive the call. Elsewhere only the direct
/// child is killed.
///
/// A non-zero exit status is reported as [`ProbeError::Command`]; a program
/// that cannot be found is reported as [`ProbeError::Dependency`].
pub fn run_captured<A: AsRef<OsStr>>(
    program: &str,
    args: &[A],
    timeout: Option<Duration>,
) -> Result<()> {
    let full_command = describe(program, args);
    let expression = cmd(program, args)
        .stdout_capture()
        .stderr_capture()
        .stdin_null()
        .unchecked();

    let Some(timeout) = timeout else {
        let output = expression
            .run()
            .map_err(|e| spawn_error(program, &full_command, e))?;
        return check_status(&full_command, &output);
    };

    let handle = in_own_process_group(expression)
        .start()
        .map_err(|e| spawn_error(program, &full_command, e))?;
    let start = Instant::now();

    loop {
        match handle.try_wait() {
            Ok(Some(output)) => return check_status(&full_command, output),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    if let Err(e) = kill_process_groups(&handle) {
                        warn!("Failed to kill process group of '{}': {}", full_command, e);
                    }
                    if let Err(e) = handle.kill() {
                        warn!("Failed to kill timed out command '{}': {}", full_command, e);
                    }
                    return Err(ProbeError::Timeout(format!(
                        "'{}' did not finish within {}s\n\nTo debug, try running manually:\n  {}",
                        full_command,
                        timeout.as_secs_f64(),
                        full_command
                    )));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(ProbeError::Internal(format!(
                    "Error waiting for command '{}': {}",
                    full_command, e
                )));
            }
        }
    }
}

/// Checks if a command-line tool is available in the system's PATH.
///
/// Paths containing a separator are checked directly.
pub fn is_tool_installed(tool_name: &str) -> bool {
    let found = which(tool_name).is_ok();
    debug!(tool = tool_name, found, "Tool lookup");
    found
}
