//! TAP 13 stream reporter.

use std::io::Write;

use mrep_events::{Reporter, ReporterError, RunEvent};

use super::output::open_output;
use crate::options::ReporterOptions;

pub struct TapReporter {
    out: Box<dyn Write>,
}

impl TapReporter {
    pub fn new(options: &ReporterOptions) -> Result<Self, ReporterError> {
        Ok(Self::with_writer(open_output(options)?))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl Reporter for TapReporter {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        match event {
            RunEvent::Start { total } => {
                writeln!(self.out, "TAP version 13")?;
                writeln!(self.out, "1..{}", total)?;
            }
            RunEvent::Pass { test } => {
                writeln!(self.out, "ok {} {}", test.index, test.full_title)?;
            }
            RunEvent::Fail { test, failure } => {
                writeln!(self.out, "not ok {} {}", test.index, test.full_title)?;
                writeln!(self.out, "  ---")?;
                for line in failure.message.lines() {
                    writeln!(self.out, "  # {}", line)?;
                }
                writeln!(self.out, "  ...")?;
            }
            RunEvent::Pending { test } => {
                writeln!(self.out, "ok {} {} # SKIP -", test.index, test.full_title)?;
            }
            RunEvent::End { stats } => {
                writeln!(self.out, "# tests {}", stats.tests)?;
                writeln!(self.out, "# pass {}", stats.passes)?;
                writeln!(self.out, "# fail {}", stats.failures)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::testing::{run_sample, sample_options};

    #[test]
    fn test_tap_output() {
        let (dir, options) = sample_options("tap", "run.tap");
        let mut reporter = TapReporter::new(&options).unwrap();

        run_sample(&mut reporter);

        let text = std::fs::read_to_string(dir.path().join("run.tap")).unwrap();
        assert_eq!(
            text,
            "TAP version 13\n\
             1..3\n\
             ok 1 #sample #passes\n\
             not ok 2 #sample #fails\n\
             \x20\x20---\n\
             \x20\x20# assertion failed\n\
             \x20\x20...\n\
             ok 3 #sample #pending # SKIP -\n\
             # tests 3\n\
             # pass 1\n\
             # fail 1\n"
        );
    }
}
