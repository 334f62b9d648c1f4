//! Run events emitted by the host runner.

use serde::{Deserialize, Serialize};

use crate::stats::RunStats;

/// Final state of a test that ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
}

impl TestState {
    /// Lowercase name as reported in run output (`passed`, `failed`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TestState::Passed => "passed",
            TestState::Failed => "failed",
        }
    }
}

/// Snapshot of a suite at the time an event fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInfo {
    pub title: String,
    /// Root suites are not counted in [`RunStats::suites`].
    pub root: bool,
    /// Number of tests directly in the suite.
    pub test_count: usize,
}

/// Snapshot of a test at the time an event fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInfo {
    pub title: String,

    /// Suite title and test title joined with a space.
    pub full_title: String,

    /// Position of the test within the run, starting at 1.
    pub index: usize,

    /// `None` until the test has run, and for pending tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TestState>,

    pub pending: bool,

    /// Wall-clock time spent in the test body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Why a test failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub message: String,
}

impl FailureInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single run event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// The run is about to start; `total` is the number of tests.
    Start { total: usize },
    SuiteStart { suite: SuiteInfo },
    SuiteEnd { suite: SuiteInfo },
    TestStart { test: TestInfo },
    Pass { test: TestInfo },
    Fail { test: TestInfo, failure: FailureInfo },
    /// Emitted instead of `TestStart`/`Pass`/`Fail` for tests that never run.
    Pending { test: TestInfo },
    TestEnd { test: TestInfo },
    /// The run has finished; carries the aggregate statistics.
    End { stats: RunStats },
}

impl RunEvent {
    /// Stable event name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::Start { .. } => "start",
            RunEvent::SuiteStart { .. } => "suite",
            RunEvent::SuiteEnd { .. } => "suite end",
            RunEvent::TestStart { .. } => "test",
            RunEvent::Pass { .. } => "pass",
            RunEvent::Fail { .. } => "fail",
            RunEvent::Pending { .. } => "pending",
            RunEvent::TestEnd { .. } => "test end",
            RunEvent::End { .. } => "end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_test() -> TestInfo {
        TestInfo {
            title: "#test-2".to_string(),
            full_title: "#multi-reporter #test-2".to_string(),
            index: 2,
            state: Some(TestState::Failed),
            pending: false,
            duration_ms: Some(3),
        }
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_value(TestState::Failed).unwrap();
        assert_eq!(json, "failed");
        assert_eq!(TestState::Passed.as_str(), "passed");
    }

    #[test]
    fn test_event_is_tagged() {
        let event = RunEvent::Fail {
            test: sample_test(),
            failure: FailureInfo::new("boom"),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "fail");
        assert_eq!(json["test"]["state"], "failed");
        assert_eq!(json["failure"]["message"], "boom");
    }

    #[test]
    fn test_pending_test_omits_state() {
        let mut test = sample_test();
        test.state = None;
        test.pending = true;
        test.duration_ms = None;

        let json = serde_json::to_value(&test).unwrap();
        assert!(json.get("state").is_none());
        assert!(json.get("duration_ms").is_none());
        assert_eq!(json["pending"], true);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(RunEvent::Start { total: 0 }.name(), "start");
        assert_eq!(
            RunEvent::End {
                stats: RunStats::default()
            }
            .name(),
            "end"
        );
    }
}
