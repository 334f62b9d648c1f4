//! Minimal synchronous host runner.
//!
//! Runs the tests of a single suite in order and emits [`RunEvent`]s to one
//! reporter. A test without a body is pending; a body that returns `Err` or
//! panics fails the test.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::error::ReporterError;
use crate::event::{FailureInfo, RunEvent, SuiteInfo, TestInfo, TestState};
use crate::stats::RunStats;
use crate::Reporter;

type TestBody = Box<dyn FnMut() -> Result<(), String>>;

/// A single test case.
pub struct Test {
    pub title: String,
    body: Option<TestBody>,
    pub state: Option<TestState>,
    pub pending: bool,
    pub duration_ms: Option<u64>,
}

impl Test {
    /// Create a test with a body.
    pub fn new<F>(title: impl Into<String>, body: F) -> Self
    where
        F: FnMut() -> Result<(), String> + 'static,
    {
        Self {
            title: title.into(),
            body: Some(Box::new(body)),
            state: None,
            pending: false,
            duration_ms: None,
        }
    }

    /// Create a test that never completes and is reported as pending.
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            state: None,
            pending: true,
            duration_ms: None,
        }
    }

    fn info(&self, suite_title: &str, index: usize) -> TestInfo {
        let full_title = if suite_title.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", suite_title, self.title)
        };
        TestInfo {
            title: self.title.clone(),
            full_title,
            index,
            state: self.state,
            pending: self.pending,
            duration_ms: self.duration_ms,
        }
    }

    fn execute(&mut self) -> Result<(), String> {
        let Some(body) = self.body.as_mut() else {
            return Ok(());
        };
        match panic::catch_unwind(AssertUnwindSafe(|| body())) {
            Ok(result) => result,
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}

/// An ordered collection of tests.
#[derive(Debug)]
pub struct Suite {
    pub title: String,
    pub root: bool,
    pub tests: Vec<Test>,
}

impl Suite {
    /// Create a regular suite. It counts towards [`RunStats::suites`].
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: false,
            tests: Vec::new(),
        }
    }

    /// Create a root suite. It is not counted in the statistics.
    pub fn root(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: true,
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: Test) -> &mut Self {
        self.tests.push(test);
        self
    }

    fn info(&self) -> SuiteInfo {
        SuiteInfo {
            title: self.title.clone(),
            root: self.root,
            test_count: self.tests.len(),
        }
    }
}

/// Runs a suite and reports to a single [`Reporter`].
///
/// Fan-out to several reporters is done by passing a composite reporter.
#[derive(Debug)]
pub struct Runner {
    pub suite: Suite,
    pub stats: RunStats,
}

impl Runner {
    pub fn new(suite: Suite) -> Self {
        Self {
            suite,
            stats: RunStats::default(),
        }
    }

    /// Run every test, emitting events to `reporter`.
    ///
    /// Returns the failure count, which is also handed to
    /// [`Reporter::done`]. A reporter error aborts the run immediately.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<usize, ReporterError> {
        self.stats = RunStats::default();
        self.stats.begin();

        tracing::debug!(suite = %self.suite.title, tests = self.suite.tests.len(), "run starting");
        reporter.on_event(&RunEvent::Start {
            total: self.suite.tests.len(),
        })?;

        let suite_info = self.suite.info();
        if !self.suite.root {
            self.stats.suites += 1;
        }
        reporter.on_event(&RunEvent::SuiteStart {
            suite: suite_info.clone(),
        })?;

        let suite_title = self.suite.title.clone();
        for (offset, test) in self.suite.tests.iter_mut().enumerate() {
            let index = offset + 1;

            if test.pending {
                self.stats.pending += 1;
                reporter.on_event(&RunEvent::Pending {
                    test: test.info(&suite_title, index),
                })?;
            } else {
                reporter.on_event(&RunEvent::TestStart {
                    test: test.info(&suite_title, index),
                })?;

                let started = Instant::now();
                let outcome = test.execute();
                test.duration_ms = Some(started.elapsed().as_millis() as u64);

                match outcome {
                    Ok(()) => {
                        test.state = Some(TestState::Passed);
                        self.stats.passes += 1;
                        reporter.on_event(&RunEvent::Pass {
                            test: test.info(&suite_title, index),
                        })?;
                    }
                    Err(message) => {
                        test.state = Some(TestState::Failed);
                        self.stats.failures += 1;
                        tracing::debug!(test = %test.title, %message, "test failed");
                        reporter.on_event(&RunEvent::Fail {
                            test: test.info(&suite_title, index),
                            failure: FailureInfo::new(message),
                        })?;
                    }
                }
            }

            self.stats.tests += 1;
            reporter.on_event(&RunEvent::TestEnd {
                test: test.info(&suite_title, index),
            })?;
        }

        reporter.on_event(&RunEvent::SuiteEnd { suite: suite_info })?;

        self.stats.finish();
        reporter.on_event(&RunEvent::End {
            stats: self.stats.clone(),
        })?;

        let failures = self.stats.failures;
        tracing::debug!(failures, "run finished");
        reporter.done(failures)?;
        Ok(failures)
    }
}
