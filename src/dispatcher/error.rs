use mrep_events::ReporterError;

use crate::config::ConfigError;

/// Errors raised while setting up a [`MultiReporter`](super::MultiReporter).
///
/// Setup is fail-fast: a run never starts with a partial reporter set.
#[derive(Debug, thiserror::Error)]
pub enum MultiReporterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no reporters enabled (reporterEnabled is missing or empty)")]
    NoReporters,

    #[error("reporter `{name}` is neither built in nor registered")]
    UnresolvedReporter { name: String },

    #[error("failed to construct reporter `{name}`: {source}")]
    Construct {
        name: String,
        #[source]
        source: ReporterError,
    },

    #[error(transparent)]
    Reporter(#[from] ReporterError),
}
