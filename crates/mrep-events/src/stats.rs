//! Aggregate run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Non-root suites that started.
    pub suites: usize,

    /// Tests that finished, pending ones included.
    pub tests: usize,

    pub passes: usize,
    pub pending: usize,
    pub failures: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl RunStats {
    /// Record the start of the run.
    pub fn begin(&mut self) {
        self.start = Some(Utc::now());
    }

    /// Record the end of the run and compute the duration.
    pub fn finish(&mut self) {
        let end = Utc::now();
        if let Some(start) = self.start {
            let millis = (end - start).num_milliseconds().max(0);
            self.duration_ms = Some(millis as u64);
        }
        self.end = Some(end);
    }

    /// Human-readable one-line summary.
    pub fn human_summary(&self) -> String {
        let mut parts = vec![format!("{} passing", self.passes)];
        if self.pending > 0 {
            parts.push(format!("{} pending", self.pending));
        }
        if self.failures > 0 {
            parts.push(format!("{} failing", self.failures));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_computes_duration() {
        let mut stats = RunStats::default();
        stats.begin();
        stats.finish();

        assert!(stats.end.is_some());
        assert!(stats.duration_ms.is_some());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut stats = RunStats::default();
        stats.finish();

        assert!(stats.end.is_some());
        assert!(stats.duration_ms.is_none());
    }

    #[test]
    fn test_human_summary() {
        let stats = RunStats {
            suites: 1,
            tests: 3,
            passes: 1,
            pending: 1,
            failures: 1,
            ..Default::default()
        };
        assert_eq!(stats.human_summary(), "1 passing, 1 pending, 1 failing");

        let clean = RunStats {
            passes: 2,
            tests: 2,
            ..Default::default()
        };
        assert_eq!(clean.human_summary(), "2 passing");
    }
}
