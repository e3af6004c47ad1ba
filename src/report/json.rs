//! JSON coverage report importer
//!
//! Expected shape (extra fields are ignored):
//!
//! ```json
//! {
//!     "files": {
//!         "src/lib.py": {
//!             "summary": { "covered_lines": 2, "missing_lines": 3 }
//!         }
//!     }
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use super::collect_report;
use crate::config::ReportConfig;
use crate::core::errors::{Error, Result};
use crate::core::types::{CoverageReport, FileCoverage};

#[derive(Debug, Deserialize)]
struct RawReport {
    files: HashMap<String, RawFileEntry>,
}

#[derive(Debug, Deserialize)]
struct RawFileEntry {
    summary: RawSummary,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    covered_lines: u64,
    missing_lines: u64,
}

/// Import a JSON coverage report with the default entry policy
pub fn import_json(text: &str) -> Result<CoverageReport> {
    import_json_with(text, &ReportConfig::default())
}

/// Import a JSON coverage report.
///
/// Malformed JSON, a missing `files` map, or entries without integer
/// `summary.covered_lines`/`summary.missing_lines` fail the whole import.
pub fn import_json_with(text: &str, config: &ReportConfig) -> Result<CoverageReport> {
    let raw: RawReport = serde_json::from_str(text)
        .map_err(|e| Error::malformed_report(format!("invalid coverage JSON: {e}")))?;
    log::debug!("imported {} file entries from JSON report", raw.files.len());
    Ok(collect_report(
        raw.files.into_iter().map(|(path, entry)| {
            let summary = entry.summary;
            (
                path,
                FileCoverage::new(summary.covered_lines, summary.missing_lines),
            )
        }),
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_summary_counts() {
        let text = r#"{"files": {"lib.py": {"summary": {"covered_lines": 2, "missing_lines": 3}}}}"#;
        let report = import_json(text).unwrap();
        let cov = report.get("lib.py").unwrap();
        assert_eq!(cov.total_lines(), 5);
        assert_eq!(cov.percent_covered(), 40.0);
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let text = r#"{
            "meta": {"version": "7.3"},
            "files": {
                "lib.py": {
                    "executed_lines": [1, 2],
                    "summary": {"covered_lines": 2, "missing_lines": 0, "excluded_lines": 1}
                }
            },
            "totals": {"covered_lines": 2}
        }"#;
        let report = import_json(text).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("lib.py").unwrap().covered_lines, 2);
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = import_json("{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedReport(_)));
    }

    #[test]
    fn test_rejects_missing_summary_keys() {
        let text = r#"{"files": {"lib.py": {"summary": {"covered_lines": 2}}}}"#;
        let err = import_json(text).unwrap_err();
        assert!(matches!(err, Error::MalformedReport(_)));
    }

    #[test]
    fn test_rejects_negative_counts() {
        let text = r#"{"files": {"lib.py": {"summary": {"covered_lines": -1, "missing_lines": 3}}}}"#;
        let err = import_json(text).unwrap_err();
        assert!(matches!(err, Error::MalformedReport(_)));
    }

    #[test]
    fn test_zero_coverage_entries_follow_config() {
        let text = r#"{"files": {
            "lib.py": {"summary": {"covered_lines": 1, "missing_lines": 0}},
            "empty.py": {"summary": {"covered_lines": 0, "missing_lines": 0}}
        }}"#;

        let kept = import_json(text).unwrap();
        assert_eq!(kept.len(), 2);

        let config = ReportConfig {
            include_zero_coverage_files: false,
        };
        let dropped = import_json_with(text, &config).unwrap();
        assert_eq!(dropped.len(), 1);
        assert!(dropped.get("empty.py").is_none());
    }
}
