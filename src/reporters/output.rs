//! Output destination shared by the built-in reporters.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use mrep_events::ReporterError;

use crate::options::ReporterOptions;

/// Open the reporter's output: the `output` file if configured (parent
/// directories are created), stdout otherwise.
pub fn open_output(options: &ReporterOptions) -> Result<Box<dyn Write>, ReporterError> {
    match options.output_path() {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = File::create(&path).map_err(|e| {
                ReporterError::message(format!(
                    "{}: cannot create {}: {}",
                    options.id(),
                    path.display(),
                    e
                ))
            })?;
            tracing::debug!(
                reporter = options.id(),
                path = %path.display(),
                "writing report to file"
            );
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
