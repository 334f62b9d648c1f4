//! Minimal dot-matrix reporter.

use std::io::Write;

use mrep_events::{Reporter, ReporterError, RunEvent};

use super::output::open_output;
use crate::options::ReporterOptions;

pub struct DotReporter {
    out: Box<dyn Write>,
}

impl DotReporter {
    pub fn new(options: &ReporterOptions) -> Result<Self, ReporterError> {
        Ok(Self::with_writer(open_output(options)?))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl Reporter for DotReporter {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        match event {
            RunEvent::Start { .. } => write!(self.out, "  ")?,
            RunEvent::Pass { .. } => write!(self.out, ".")?,
            RunEvent::Fail { .. } => write!(self.out, "!")?,
            RunEvent::Pending { .. } => write!(self.out, ",")?,
            RunEvent::End { stats } => {
                writeln!(self.out)?;
                writeln!(self.out)?;
                writeln!(self.out, "  {}", stats.human_summary())?;
                self.out.flush()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn done(&mut self, _failures: usize) -> Result<(), ReporterError> {
        self.out.flush()?;
        Ok(())
    }
}
