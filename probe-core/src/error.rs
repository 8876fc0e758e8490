use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    Config(String),
    Io(#[from] std::io::Error),
    Command(String),
    Dependency(String),
    Timeout(String),
    Internal(String),
    Serialization(String),
}

impl Display for ProbeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ProbeError::Config(s) => write!(f, "Configuration error: {}", s),
            ProbeError::Io(e) => write!(f, "I/O error: {}", e),
            ProbeError::Command(s) => write!(f, "Command failed: {}", s),
            ProbeError::Dependency(s) => write!(f, "Dependency not found: {}", s),
            ProbeError::Timeout(s) => write!(f, "Timed out: {}", s),
            ProbeError::Internal(s) => write!(f, "Internal error: {}", s),
            ProbeError::Serialization(s) => write!(f, "Serialization error: {}", s),
        }
    }
}

impl From<serde_yaml_ng::Error> for ProbeError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ProbeError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = ProbeError::Dependency("gexec".to_string());
        assert_eq!(err.to_string(), "Dependency not found: gexec");

        let err = ProbeError::Timeout("gexec echo test".to_string());
        assert_eq!(err.to_string(), "Timed out: gexec echo test");
    }

    #[test]
    fn test_yaml_error_maps_to_serialization() {
        let parse: std::result::Result<Vec<u32>, _> = serde_yaml_ng::from_str("{not: [a list");
        let err: ProbeError = parse.unwrap_err().into();
        assert!(matches!(err, ProbeError::Serialization(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ProbeError = io.into();
        assert_eq!(err.to_string(), "I/O error: no such file");
    }
}
