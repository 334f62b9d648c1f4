//! Reporter runtime errors.

use std::io;

/// Error raised by a reporter while constructing itself or handling events.
///
/// The dispatcher never swallows these; they abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    /// Writing reporter output failed.
    #[error("reporter output failed: {0}")]
    Io(#[from] io::Error),

    /// Any other reporter failure.
    #[error("{0}")]
    Message(String),
}

impl ReporterError {
    /// Create a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = ReporterError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "reporter output failed: pipe closed");
    }

    #[test]
    fn test_message_error_display() {
        let err = ReporterError::message("xunit: output directory is read-only");
        assert_eq!(err.to_string(), "xunit: output directory is read-only");
    }
}
