//! Coverage report importers
//!
//! Two textual formats are understood: the JSON summary format and the
//! Cobertura XML format emitted by coverage.py. Importers either produce a
//! complete [`CoverageReport`](crate::core::types::CoverageReport) or fail
//! with [`Error::MalformedReport`](crate::core::errors::Error); partial
//! reports are never returned.

pub mod json;
pub mod xml;

pub use json::{import_json, import_json_with};
pub use xml::{import_xml, import_xml_with};

use crate::config::ReportConfig;
use crate::core::types::{CoverageReport, FileCoverage};

/// Build a report, applying the zero-coverage entry policy
fn collect_report<I>(entries: I, config: &ReportConfig) -> CoverageReport
where
    I: IntoIterator<Item = (String, FileCoverage)>,
{
    entries
        .into_iter()
        .filter(|(_, cov)| config.include_zero_coverage_files || cov.total_lines() > 0)
        .collect()
}
