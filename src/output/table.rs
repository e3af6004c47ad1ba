//! Table projection for the sunburst/treemap renderer

use rayon::prelude::*;
use serde::Serialize;

use crate::core::types::CoverageReport;
use crate::importance::Importance;

/// One row of the renderer's flat table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRecord {
    pub path: String,
    /// Last path component
    pub name: String,
    /// Visual weight: an importance score or a line total
    pub value: u64,
    pub percent_covered: f64,
    /// Ordered path components, outermost first
    pub segments: Vec<String>,
}

impl ProjectedRecord {
    fn new(path: &str, value: u64, percent_covered: f64) -> Self {
        Self {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            value,
            percent_covered,
            segments: path.split('/').map(str::to_string).collect(),
        }
    }
}

/// Importance-weighted projection.
///
/// Zero-scored files and the report-wide rollup row (empty path) are
/// omitted; rows sort by path ascending. Scoring runs in parallel: the
/// report and the scorer's index are read-only by the time this is called.
pub fn project_importance<S>(report: &CoverageReport, importance: &S) -> Vec<ProjectedRecord>
where
    S: Importance + Sync + ?Sized,
{
    let mut records: Vec<ProjectedRecord> = report
        .iter()
        .filter(|(path, _)| !path.is_empty())
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter_map(|(path, cov)| {
            let value = importance.get_importance(path);
            (value > 0).then(|| ProjectedRecord::new(path, value, cov.percent_covered()))
        })
        .collect();
    records.sort_by(|a, b| a.path.cmp(&b.path));
    records
}

/// Line-total projection used by the older export shape.
///
/// The value is the file's total measurable lines and zero-total files stay
/// in the table (their percentage is 0.0). Same rollup-row exclusion and
/// ordering as [`project_importance`].
pub fn project_total_lines(report: &CoverageReport) -> Vec<ProjectedRecord> {
    let mut records: Vec<ProjectedRecord> = report
        .iter()
        .filter(|(path, _)| !path.is_empty())
        .map(|(path, cov)| ProjectedRecord::new(path, cov.total_lines(), cov.percent_covered()))
        .collect();
    records.sort_by(|a, b| a.path.cmp(&b.path));
    records
}
