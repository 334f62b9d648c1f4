//! Shared configuration fixtures for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mrep::events::{Suite, Test};
use mrep::Overrides;

/// Directory holding the JSON fixtures
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Custom config enabling `dot` and replacing the xunit options
pub fn internal_config_path() -> PathBuf {
    fixtures_dir().join("custom-internal-config.json")
}

/// Custom config enabling an external reporter
pub fn external_config_path() -> PathBuf {
    fixtures_dir().join("custom-external-config.json")
}

/// Truncated JSON document
pub fn malformed_config_path() -> PathBuf {
    fixtures_dir().join("malformed-config.json")
}

/// Overrides as a host runner passes them: `{execute: false, reporterOptions: {configFile}}`
pub fn overrides_for(path: &Path) -> Overrides {
    Overrides::from_value(serde_json::json!({
        "execute": false,
        "reporterOptions": {
            "configFile": path,
        }
    }))
    .expect("fixture overrides are valid")
}

/// Suite `#multi-reporter` with one passing and one failing test
pub fn pass_fail_suite() -> Suite {
    let mut suite = Suite::new("#multi-reporter");
    suite.add_test(Test::new("#test-1", || Ok(())));
    suite.add_test(Test::new("#test-2", || Err("#test-2 failed".to_string())));
    suite
}

/// Suite `#multi-reporter` with two tests that never complete
pub fn pending_suite() -> Suite {
    let mut suite = Suite::new("#multi-reporter");
    suite.add_test(Test::pending("#test-1"));
    suite.add_test(Test::pending("#test-2"));
    suite
}
