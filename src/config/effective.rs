//! Effective options with provenance
//!
//! The effective options are the merged configuration for one run plus
//! information about where each layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::loader::{json_kind, ConfigLoader, LoadedConfig};
use super::merge::merge_layers;
use super::overrides::Overrides;

/// Key holding the comma-separated list of enabled reporters
pub const REPORTER_ENABLED_KEY: &str = "reporterEnabled";

/// Key holding the primary reporter's options
pub const REPORTER_OPTIONS_KEY: &str = "reporterOptions";

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Default,
    Custom,
    Inline,
}

/// A contributing config layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for inline overrides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// SHA-256 digest of raw file bytes (None for inline overrides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn from_file(origin: ConfigOrigin, loaded: &LoadedConfig) -> Self {
        Self {
            origin,
            path: Some(loaded.path.clone()),
            digest: Some(loaded.digest.clone()),
        }
    }
}

/// Merged configuration for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveOptions {
    /// When these options were resolved
    pub resolved_at: DateTime<Utc>,

    /// The merged configuration object
    pub config: Map<String, Value>,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveOptions {
    /// Build effective options directly from a configuration object.
    pub fn from_config(config: Map<String, Value>) -> Self {
        Self {
            resolved_at: Utc::now(),
            config,
            sources: Vec::new(),
        }
    }

    /// Get a top-level config value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Get a top-level config value as an object
    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// Ordered reporter identifiers from `reporterEnabled`.
    ///
    /// Entries are trimmed and empty entries dropped. Duplicates are kept.
    /// A missing key yields an empty list.
    pub fn reporter_enabled(&self) -> Result<Vec<String>, ConfigError> {
        match self.get(REPORTER_ENABLED_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(list)) => Ok(list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()),
            Some(other) => {
                tracing::debug!(found = json_kind(other), "rejecting {}", REPORTER_ENABLED_KEY);
                Err(ConfigError::InvalidField {
                    key: REPORTER_ENABLED_KEY.to_string(),
                    expected: "a comma-separated string",
                })
            }
        }
    }

    /// The merged configuration as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.config.clone())
    }

    /// Serialize with provenance to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Combines built-in defaults, a custom configuration file, and inline
/// overrides into [`EffectiveOptions`].
#[derive(Debug, Clone)]
pub struct OptionsResolver {
    /// Defaults file; `None` uses the compiled-in configuration
    default_path: Option<PathBuf>,
    loader: ConfigLoader,
}

impl Default for OptionsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsResolver {
    /// Resolver using the compiled-in defaults.
    pub fn new() -> Self {
        Self {
            default_path: None,
            loader: ConfigLoader,
        }
    }

    /// Resolver reading defaults from `path`.
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: Some(path.into()),
            loader: ConfigLoader,
        }
    }

    pub fn default_path(&self) -> Option<&Path> {
        self.default_path.as_deref()
    }

    /// Built-in defaults, verbatim.
    pub fn get_default_options(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.load_default()?.values)
    }

    /// Contents of the custom configuration file, or of the default file
    /// when no custom file is named.
    pub fn get_custom_options(
        &self,
        overrides: Option<&Overrides>,
    ) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.load_custom(overrides)?.values)
    }

    /// Shallow union of defaults, custom file, and inline overrides.
    ///
    /// For every top-level key the last layer that has it wins outright.
    pub fn get_options(
        &self,
        overrides: Option<&Overrides>,
    ) -> Result<EffectiveOptions, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        let defaults = self.load_default()?;
        tracing::debug!(
            path = %defaults.path.display(),
            digest = %defaults.digest,
            "loaded default options"
        );
        sources.push(ConfigSource::from_file(ConfigOrigin::Default, &defaults));
        layers.push(defaults.values);

        // Layer 2: Custom file
        let custom = self.load_custom(overrides)?;
        tracing::debug!(
            path = %custom.path.display(),
            digest = %custom.digest,
            "loaded custom options"
        );
        sources.push(ConfigSource::from_file(ConfigOrigin::Custom, &custom));
        layers.push(custom.values);

        // Layer 3: Inline overrides
        if let Some(inline) = overrides.map(Overrides::inline).filter(|m| !m.is_empty()) {
            tracing::debug!(keys = inline.len(), "applying inline overrides");
            sources.push(ConfigSource {
                origin: ConfigOrigin::Inline,
                path: None,
                digest: None,
            });
            layers.push(inline.clone());
        }

        let config = merge_layers(layers);
        tracing::trace!(keys = ?config.keys().collect::<Vec<_>>(), "resolved effective options");

        Ok(EffectiveOptions {
            resolved_at: Utc::now(),
            config,
            sources,
        })
    }

    fn load_default(&self) -> Result<LoadedConfig, ConfigError> {
        match &self.default_path {
            Some(path) => self.loader.load(path),
            None => self.loader.builtin(),
        }
    }

    fn load_custom(&self, overrides: Option<&Overrides>) -> Result<LoadedConfig, ConfigError> {
        match overrides.and_then(Overrides::config_file) {
            Some(path) => self.loader.load(path),
            None => self.load_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, value: Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
        path
    }

    fn defaults() -> Value {
        json!({
            "reporterEnabled": "spec, xunit",
            "reporterOptions": {"id": "default"},
            "xunitReporterOptions": {"id": "xunit", "output": "xunit.xml"}
        })
    }

    #[test]
    fn test_defaults_only() {
        let dir = TempDir::new().unwrap();
        let default_path = write_config(&dir, "config.json", defaults());
        let resolver = OptionsResolver::with_default_path(&default_path);

        let options = resolver.get_options(None).unwrap();

        assert_eq!(options.to_value(), defaults());
        assert_eq!(options.sources.len(), 2);
        assert_eq!(options.sources[0].origin, ConfigOrigin::Default);
        assert_eq!(options.sources[1].origin, ConfigOrigin::Custom);
        assert_eq!(options.sources[1].path.as_deref(), Some(default_path.as_path()));
    }

    #[test]
    fn test_custom_replaces_whole_reporter_options() {
        let dir = TempDir::new().unwrap();
        let default_path = write_config(&dir, "config.json", defaults());
        let custom_path = write_config(
            &dir,
            "custom.json",
            json!({
                "reporterEnabled": "dot",
                "xunitReporterOptions": {"output": "artifacts/test/custom-xunit.xml"}
            }),
        );
        let resolver = OptionsResolver::with_default_path(default_path);

        let options = resolver
            .get_options(Some(&Overrides::with_config_file(custom_path)))
            .unwrap();

        assert_eq!(
            options.to_value(),
            json!({
                "reporterEnabled": "dot",
                "reporterOptions": {"id": "default"},
                "xunitReporterOptions": {"output": "artifacts/test/custom-xunit.xml"}
            })
        );
    }

    #[test]
    fn test_inline_layer_wins() {
        let dir = TempDir::new().unwrap();
        let default_path = write_config(&dir, "config.json", defaults());
        let resolver = OptionsResolver::with_default_path(default_path);
        let overrides = Overrides::default().set("reporterEnabled", "tap");

        let options = resolver.get_options(Some(&overrides)).unwrap();

        assert_eq!(options.get("reporterEnabled"), Some(&json!("tap")));
        assert_eq!(options.sources.len(), 3);
        assert_eq!(options.sources[2].origin, ConfigOrigin::Inline);
        assert!(options.sources[2].digest.is_none());
    }

    #[test]
    fn test_reporter_enabled_parsing() {
        let options = EffectiveOptions::from_config(
            json!({"reporterEnabled": " spec ,xunit,, spec "})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(options.reporter_enabled().unwrap(), vec!["spec", "xunit", "spec"]);

        let empty = EffectiveOptions::from_config(Map::new());
        assert!(empty.reporter_enabled().unwrap().is_empty());
    }

    #[test]
    fn test_reporter_enabled_must_be_string() {
        let options = EffectiveOptions::from_config(
            json!({"reporterEnabled": ["spec"]}).as_object().cloned().unwrap(),
        );
        let err = options.reporter_enabled().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));
    }

    #[test]
    fn test_builtin_defaults_need_no_files() {
        let resolver = OptionsResolver::new();
        assert!(resolver.default_path().is_none());

        let options = resolver.get_options(None).unwrap();

        assert_eq!(options.get("reporterEnabled"), Some(&json!("spec, xunit")));
        let path = options.sources[0].path.as_deref().unwrap();
        assert!(path.is_relative());
        assert_eq!(path, Path::new(crate::config::CONFIG_FILE));
    }

    #[test]
    fn test_missing_default_file() {
        let dir = TempDir::new().unwrap();
        let resolver = OptionsResolver::with_default_path(dir.path().join("missing.json"));

        assert!(matches!(resolver.get_default_options(), Err(ConfigError::Io { .. })));
        assert!(matches!(resolver.get_options(None), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_to_json_includes_provenance() {
        let dir = TempDir::new().unwrap();
        let default_path = write_config(&dir, "config.json", defaults());
        let options = OptionsResolver::with_default_path(default_path)
            .get_options(None)
            .unwrap();

        let json: Value = serde_json::from_str(&options.to_json().unwrap()).unwrap();
        assert_eq!(json["sources"][0]["origin"], "default");
        assert_eq!(json["config"]["reporterEnabled"], "spec, xunit");
    }
}
