//! Caller-supplied overrides passed at construction time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Options handed to the dispatcher by its caller.
///
/// Shaped `{ "reporterOptions": { "configFile": "...", ... }, ... }`. Keys
/// outside `reporterOptions` belong to the host runner and are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(default)]
    pub reporter_options: ReporterOverrides,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The `reporterOptions` part of [`Overrides`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterOverrides {
    /// Custom configuration file; the built-in file is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,

    /// Configuration keys applied on top of the file configuration.
    #[serde(flatten)]
    pub inline: Map<String, Value>,
}

impl Overrides {
    /// Overrides naming a custom configuration file.
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            reporter_options: ReporterOverrides {
                config_file: Some(path.into()),
                inline: Map::new(),
            },
            other: Map::new(),
        }
    }

    /// Parse overrides from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Add an inline configuration key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.reporter_options.inline.insert(key.into(), value.into());
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.reporter_options.config_file.as_deref()
    }

    pub fn inline(&self) -> &Map<String, Value> {
        &self.reporter_options.inline
    }
}
