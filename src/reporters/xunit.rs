//! XUnit-style XML reporter.
//!
//! Collects test outcomes during the run and writes a single `<testsuite>`
//! document when the run ends.

use chrono::Utc;
use std::io::Write;

use mrep_events::{Reporter, ReporterError, RunEvent, RunStats, TestInfo};

use super::output::open_output;
use crate::options::ReporterOptions;

/// Suite name used when `suiteName` is not configured
pub const DEFAULT_SUITE_NAME: &str = "Mocha Tests";

enum Outcome {
    Passed,
    Failed(String),
    Skipped,
}

struct Case {
    classname: String,
    test: TestInfo,
    outcome: Outcome,
}

pub struct XunitReporter {
    out: Box<dyn Write>,
    suite_name: String,
    current_suite: String,
    cases: Vec<Case>,
}

impl XunitReporter {
    pub fn new(options: &ReporterOptions) -> Result<Self, ReporterError> {
        let suite_name = options
            .get_str("suiteName")
            .unwrap_or(DEFAULT_SUITE_NAME)
            .to_string();
        Ok(Self::with_writer(open_output(options)?, suite_name))
    }

    pub fn with_writer(out: Box<dyn Write>, suite_name: impl Into<String>) -> Self {
        Self {
            out,
            suite_name: suite_name.into(),
            current_suite: String::new(),
            cases: Vec::new(),
        }
    }

    fn record(&mut self, test: &TestInfo, outcome: Outcome) {
        self.cases.push(Case {
            classname: self.current_suite.clone(),
            test: test.clone(),
            outcome,
        });
    }

    fn write_document(&mut self, stats: &RunStats) -> Result<(), ReporterError> {
        let timestamp = stats.start.unwrap_or_else(Utc::now).format("%Y-%m-%dT%H:%M:%S");
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        // Failed assertions are failures; reporters never see runner errors
        writeln!(
            self.out,
            concat!(
                r#"<testsuite name="{}" tests="{}" failures="{}" errors="0" "#,
                r#"skipped="{}" timestamp="{}" time="{}">"#,
            ),
            escape(&self.suite_name),
            stats.tests,
            stats.failures,
            stats.pending,
            timestamp,
            seconds(stats.duration_ms),
        )?;

        for case in &self.cases {
            let open = format!(
                r#"<testcase classname="{}" name="{}" time="{}""#,
                escape(&case.classname),
                escape(&case.test.title),
                seconds(case.test.duration_ms),
            );
            match &case.outcome {
                Outcome::Passed => writeln!(self.out, "{}/>", open)?,
                Outcome::Failed(message) => writeln!(
                    self.out,
                    r#"{}><failure message="{}">{}</failure></testcase>"#,
                    open,
                    escape(message),
                    escape(message),
                )?,
                Outcome::Skipped => writeln!(self.out, "{}><skipped/></testcase>", open)?,
            }
        }

        writeln!(self.out, "</testsuite>")?;
        self.out.flush()?;
        Ok(())
    }
}

impl Reporter for XunitReporter {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        match event {
            RunEvent::SuiteStart { suite } => self.current_suite = suite.title.clone(),
            RunEvent::Pass { test } => self.record(test, Outcome::Passed),
            RunEvent::Fail { test, failure } => {
                self.record(test, Outcome::Failed(failure.message.clone()))
            }
            RunEvent::Pending { test } => self.record(test, Outcome::Skipped),
            RunEvent::End { stats } => self.write_document(stats)?,
            _ => {}
        }
        Ok(())
    }

    fn done(&mut self, _failures: usize) -> Result<(), ReporterError> {
        self.out.flush()?;
        Ok(())
    }
}

fn seconds(duration_ms: Option<u64>) -> String {
    format!("{:.3}", duration_ms.unwrap_or_default() as f64 / 1000.0)
}

/// Escape text for use in XML attributes and character data.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
