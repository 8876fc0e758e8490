//! probe-messages
//!
//! Centralized user-facing text for gexec-probe.
//! Provides message templates and the `msg!` renderer for `{variable}`
//! placeholders.

pub mod messages;
pub mod template;

pub use messages::{ProbeMessages, MESSAGES};
