pub mod config;
pub mod loader;
pub mod validate;

pub use config::{ConfigOverrides, ProbeConfig};
pub use loader::ConfigLoader;
