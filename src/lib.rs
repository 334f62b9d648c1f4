//! mrep - multi-reporter adapter
//!
//! Lets a single test run drive several reporters at once. The reporters to
//! run and their options come from a JSON configuration resolved from
//! built-in defaults, a custom configuration file, and inline overrides.

pub mod config;
pub mod dispatcher;
pub mod options;
pub mod registry;
pub mod reporters;

pub use config::{ConfigError, EffectiveOptions, OptionsResolver, Overrides};
pub use dispatcher::{MultiReporter, MultiReporterError};
pub use options::{
    get_reporter_options, ReporterDescriptor, ReporterOptions, ReporterOptionsExtractor,
};
pub use registry::ReporterRegistry;

pub use mrep_events as events;
pub use mrep_events::{Reporter, ReporterError, RunEvent, RunStats};
