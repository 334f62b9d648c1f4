//! Hierarchical human-readable reporter.

use std::io::Write;

use mrep_events::{FailureInfo, Reporter, ReporterError, RunEvent, RunStats, TestInfo};

use super::output::open_output;
use crate::options::ReporterOptions;

pub struct SpecReporter {
    out: Box<dyn Write>,
    failures: Vec<(TestInfo, FailureInfo)>,
}

impl SpecReporter {
    pub fn new(options: &ReporterOptions) -> Result<Self, ReporterError> {
        Ok(Self::with_writer(open_output(options)?))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self {
            out,
            failures: Vec::new(),
        }
    }

    fn epilogue(&mut self, stats: &RunStats) -> Result<(), ReporterError> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "  {} passing ({}ms)",
            stats.passes,
            stats.duration_ms.unwrap_or_default()
        )?;
        if stats.pending > 0 {
            writeln!(self.out, "  {} pending", stats.pending)?;
        }
        if stats.failures > 0 {
            writeln!(self.out, "  {} failing", stats.failures)?;
            for (n, (test, failure)) in self.failures.iter().enumerate() {
                writeln!(self.out)?;
                writeln!(self.out, "  {}) {}:", n + 1, test.full_title)?;
                writeln!(self.out, "     {}", failure.message)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl Reporter for SpecReporter {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        match event {
            RunEvent::SuiteStart { suite } if !suite.root => {
                writeln!(self.out)?;
                writeln!(self.out, "  {}", suite.title)?;
            }
            RunEvent::Pass { test } => {
                writeln!(self.out, "    ✓ {}", test.title)?;
            }
            RunEvent::Fail { test, failure } => {
                self.failures.push((test.clone(), failure.clone()));
                writeln!(self.out, "    {}) {}", self.failures.len(), test.title)?;
            }
            RunEvent::Pending { test } => {
                writeln!(self.out, "    - {}", test.title)?;
            }
            RunEvent::End { stats } => {
                self.epilogue(stats)?;
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
