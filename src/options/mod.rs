//! Reporter options extraction
//!
//! Maps a reporter identifier to the options object its constructor
//! receives: `reporterOptions` for the primary reporter, otherwise
//! `<camelCasedId>ReporterOptions`, always tagged with the identifier.

mod camel;
mod extractor;

pub use camel::camel_case;
pub use extractor::{
    get_reporter_options, ReporterDescriptor, ReporterOptions, ReporterOptionsExtractor, ID_KEY,
    OPTIONS_KEY_SUFFIX, PRIMARY_REPORTER_ID,
};
