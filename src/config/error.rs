use std::io;
use std::path::PathBuf;

/// Configuration errors
///
/// All variants are fatal: resolution stops at the first one and no
/// default configuration is substituted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {} must contain a JSON object, found {found}", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("config key `{key}` must be {expected}")]
    InvalidField { key: String, expected: &'static str },
}

impl ConfigError {
    /// Path of the file that caused the error, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::Io { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::NotAnObject { path, .. } => Some(path),
            ConfigError::InvalidField { .. } => None,
        }
    }
}
