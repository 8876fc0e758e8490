// Standard library imports
use std::fs;
use std::path::Path;

// External crate imports
use probe_core::error::Result;
use tracing::debug;

// Internal imports
use crate::config::ProbeConfig;

/// Loads a `ProbeConfig` from an explicitly named YAML file.
///
/// There is no implicit discovery: without a file the defaults apply.
#[derive(Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Returns the file's configuration, or the defaults when `path` is `None`.
    pub fn load(&self, path: Option<&Path>) -> Result<ProbeConfig> {
        match path {
            Some(path) => self.load_file(path),
            None => Ok(ProbeConfig::default()),
        }
    }

    pub fn load_file(&self, path: &Path) -> Result<ProbeConfig> {
        debug!("Loading config from: {}", path.display());
        let contents = fs::read_to_string(path)?;
        self.parse(&contents)
    }

    pub fn parse(&self, contents: &str) -> Result<ProbeConfig> {
        // An empty document means "all defaults".
        if contents.trim().is_empty() {
            return Ok(ProbeConfig::default());
        }
        let config: ProbeConfig = serde_yaml_ng::from_str(contents)?;
        Ok(config)
    }
}
