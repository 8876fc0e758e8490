pub mod command;
pub mod error;
pub mod output_macros;
pub mod prober;
pub mod report;

// Re-export the probing types for convenience
pub use prober::{Clock, Invoker, MonotonicClock, ProcessInvoker, Prober, TargetCommand};
pub use report::{Report, Sample, SampleStats, Verdict};
