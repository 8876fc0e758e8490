//! The sequential timing loop.
//!
//! A [`Prober`] invokes a target command a fixed number of times, one after
//! another, timing each invocation with a [`Clock`]. Invocations never
//! overlap: the next one starts only after the previous one has returned.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use crate::command::run_captured;
use crate::error::{ProbeError, Result};
use crate::report::{Report, Sample};

/// The external program being measured and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TargetCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for TargetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs the target once, to completion.
pub trait Invoker {
    fn invoke(&mut self, target: &TargetCommand) -> Result<()>;
}

/// Source of timestamps in milliseconds from an arbitrary origin.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Spawns the target as a child process with output captured and discarded.
#[derive(Debug, Default, Clone)]
pub struct ProcessInvoker {
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, target: &TargetCommand) -> Result<()> {
        run_captured(&target.program, &target.args, self.timeout)
    }
}

/// Monotonic clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

pub struct Prober<I, C> {
    target: TargetCommand,
    repetitions: u32,
    threshold_ms: f64,
    invoker: I,
    clock: C,
}

impl Prober<ProcessInvoker, MonotonicClock> {
    /// A prober that spawns real processes and times them with a monotonic clock.
    pub fn with_process(
        target: TargetCommand,
        repetitions: u32,
        threshold_ms: f64,
        timeout: Option<Duration>,
    ) -> Self {
        Self::new(
            target,
            repetitions,
            threshold_ms,
            ProcessInvoker::new(timeout),
            MonotonicClock::new(),
        )
    }
}

impl<I: Invoker, C: Clock> Prober<I, C> {
    pub fn new(
        target: TargetCommand,
        repetitions: u32,
        threshold_ms: f64,
        invoker: I,
        clock: C,
    ) -> Self {
        Self {
            target,
            repetitions,
            threshold_ms,
            invoker,
            clock,
        }
    }

    /// Runs every repetition and summarizes the samples.
    ///
    /// The first failed invocation aborts the run; failures are never
    /// recorded as samples.
    pub fn run(&mut self) -> Result<Report> {
        let span = info_span!("probe", command = %self.target, repetitions = self.repetitions);
        let _enter = span.enter();

        if self.repetitions == 0 {
            return Err(ProbeError::Config(
                "repetitions must be at least 1".to_string(),
            ));
        }

        let mut samples = Vec::with_capacity(self.repetitions as usize);
        for run in 1..=self.repetitions {
            let start = self.clock.now_ms();
            self.invoker.invoke(&self.target)?;
            let end = self.clock.now_ms();

            let sample = Sample(end - start);
            debug!(run, elapsed_ms = sample.millis(), "Invocation finished");
            samples.push(sample);
        }

        let report = Report::from_samples(self.target.to_string(), samples, self.threshold_ms)
            .ok_or_else(|| ProbeError::Internal("no samples were recorded".to_string()))?;

        info!(
            mean_ms = report.mean_ms,
            threshold_ms = report.threshold_ms,
            verdict = %report.verdict,
            "Probe finished"
        );
        Ok(report)
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }
}
