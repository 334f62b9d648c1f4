//! Per-reporter options extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::camel::camel_case;
use crate::config::{EffectiveOptions, REPORTER_OPTIONS_KEY};

/// Identifier whose options live under the top-level `reporterOptions` key.
pub const PRIMARY_REPORTER_ID: &str = "default";

/// Key injected into every extracted options object.
pub const ID_KEY: &str = "id";

/// Suffix of per-reporter option keys (`xunitReporterOptions`).
pub const OPTIONS_KEY_SUFFIX: &str = "ReporterOptions";

/// Options object handed to one reporter's constructor.
///
/// Always carries an `id` naming the reporter it was extracted for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReporterOptions(Map<String, Value>);

impl ReporterOptions {
    /// Options carrying only the reporter identity.
    pub fn for_id(id: &str) -> Self {
        Self::from_map(Map::new(), id)
    }

    fn from_map(mut map: Map<String, Value>, id: &str) -> Self {
        // Inserted last so configuration can never override it.
        map.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        Self(map)
    }

    pub fn id(&self) -> &str {
        self.get_str(ID_KEY).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The conventional `output` option as a path.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.get_str("output").map(PathBuf::from)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// One enabled reporter as resolved for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporterDescriptor {
    pub identifier: String,

    /// Configuration key the options were read from.
    pub options_key: String,

    pub resolved_options: ReporterOptions,
}

/// Produces the options object for a reporter from the effective options.
#[derive(Debug, Clone)]
pub struct ReporterOptionsExtractor {
    primary: String,
}

impl Default for ReporterOptionsExtractor {
    fn default() -> Self {
        Self::new(PRIMARY_REPORTER_ID)
    }
}

impl ReporterOptionsExtractor {
    /// Extractor treating `primary` as the reporter configured by
    /// `reporterOptions`.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Configuration key holding the options for `identifier`.
    pub fn options_key(&self, identifier: &str) -> String {
        if identifier == self.primary {
            REPORTER_OPTIONS_KEY.to_string()
        } else {
            format!("{}{}", camel_case(identifier), OPTIONS_KEY_SUFFIX)
        }
    }

    /// Options for `identifier`, augmented with `{id: identifier}`.
    ///
    /// Never fails: a reporter without configured options gets `{id}` alone.
    pub fn get_reporter_options(
        &self,
        effective: &EffectiveOptions,
        identifier: &str,
    ) -> ReporterOptions {
        let key = self.options_key(identifier);
        let base = match effective.get(&key) {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                tracing::warn!(
                    reporter = identifier,
                    key = %key,
                    value = %other,
                    "ignoring non-object reporter options"
                );
                Map::new()
            }
            None => Map::new(),
        };
        ReporterOptions::from_map(base, identifier)
    }

    pub fn descriptor(&self, effective: &EffectiveOptions, identifier: &str) -> ReporterDescriptor {
        ReporterDescriptor {
            identifier: identifier.to_string(),
            options_key: self.options_key(identifier),
            resolved_options: self.get_reporter_options(effective, identifier),
        }
    }
}

/// Options for `identifier` using the default primary reporter identifier.
pub fn get_reporter_options(effective: &EffectiveOptions, identifier: &str) -> ReporterOptions {
    ReporterOptionsExtractor::default().get_reporter_options(effective, identifier)
}
