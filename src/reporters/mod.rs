//! Built-in reporters
//!
//! Every built-in reporter writes to the file named by its `output` option,
//! or to stdout when none is configured.

mod dot;
mod output;
mod spec;
mod tap;
mod xunit;

pub use dot::DotReporter;
pub use output::open_output;
pub use spec::SpecReporter;
pub use tap::TapReporter;
pub use xunit::{escape as xml_escape, XunitReporter, DEFAULT_SUITE_NAME};

use mrep_events::{Reporter, ReporterError};

use crate::options::ReporterOptions;

pub fn create_spec(options: &ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> {
    Ok(Box::new(SpecReporter::new(options)?))
}

pub fn create_dot(options: &ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> {
    Ok(Box::new(DotReporter::new(options)?))
}

pub fn create_xunit(options: &ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> {
    Ok(Box::new(XunitReporter::new(options)?))
}

pub fn create_tap(options: &ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> {
    Ok(Box::new(TapReporter::new(options)?))
}
