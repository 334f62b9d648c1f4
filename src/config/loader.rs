//! JSON configuration file loading.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Name of the built-in configuration file, relative to the crate root.
pub const CONFIG_FILE: &str = "config.json";

/// Built-in configuration, compiled into the binary.
pub const BUILTIN_CONFIG: &str = include_str!("../../config.json");

/// A parsed configuration file
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path the file was read from
    pub path: PathBuf,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,

    /// Top-level configuration object
    pub values: Map<String, Value>,
}

/// Reads configuration files. Never falls back to defaults on failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a JSON file, returning the object and its digest
    pub fn load(&self, path: &Path) -> Result<LoadedConfig, ConfigError> {
        let bytes = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(path, &bytes)
    }

    /// Parse the compiled-in defaults, reported under [`CONFIG_FILE`]
    pub fn builtin(&self) -> Result<LoadedConfig, ConfigError> {
        self.parse(Path::new(CONFIG_FILE), BUILTIN_CONFIG.as_bytes())
    }

    /// Parse raw file contents as if read from `path`
    pub fn parse(&self, path: &Path, bytes: &[u8]) -> Result<LoadedConfig, ConfigError> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hex::encode(hasher.finalize());

        let value: Value = serde_json::from_slice(bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let values = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::NotAnObject {
                    path: path.to_path_buf(),
                    found: json_kind(&other),
                })
            }
        };

        tracing::trace!(
            path = %path.display(),
            %digest,
            keys = values.len(),
            "parsed config file"
        );

        Ok(LoadedConfig {
            path: path.to_path_buf(),
            digest,
            values,
        })
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
