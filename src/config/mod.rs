//! Configuration resolution
//!
//! Implements the 3-layer configuration merge:
//! 1. Built-in defaults (config.json, compiled in)
//! 2. Custom config file (`reporterOptions.configFile`)
//! 3. Inline overrides (other keys in `reporterOptions`)

mod effective;
mod error;
mod loader;
mod merge;
mod overrides;

pub use effective::{
    ConfigOrigin, ConfigSource, EffectiveOptions, OptionsResolver, REPORTER_ENABLED_KEY,
    REPORTER_OPTIONS_KEY,
};
pub use error::ConfigError;
pub use loader::{ConfigLoader, LoadedConfig, BUILTIN_CONFIG, CONFIG_FILE};
pub use merge::{merge_layers, shallow_merge};
pub use overrides::{Overrides, ReporterOverrides};
