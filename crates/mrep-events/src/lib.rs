//! mrep event model
//!
//! Defines the run events a host test runner emits, the aggregate run
//! statistics, and the [`Reporter`] contract every output reporter implements.
//! A minimal synchronous [`Runner`] is included so reporters can be driven
//! without a full test framework.

pub mod error;
pub mod event;
pub mod runner;
pub mod stats;

pub use error::ReporterError;
pub use event::{FailureInfo, RunEvent, SuiteInfo, TestInfo, TestState};
pub use runner::{Runner, Suite, Test};
pub use stats::RunStats;

/// An output reporter driven by run events.
///
/// Reporters are invoked synchronously, in the order they were registered,
/// once per event.
pub trait Reporter {
    /// Handle one run event.
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError>;

    /// Called once after the run has ended with the final failure count.
    fn done(&mut self, failures: usize) -> Result<(), ReporterError> {
        let _ = failures;
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        (**self).on_event(event)
    }

    fn done(&mut self, failures: usize) -> Result<(), ReporterError> {
        (**self).done(failures)
    }
}
