//! Size-based importance

use super::Importance;
use crate::core::types::CoverageReport;

/// Importance equal to the file's total measurable lines
#[derive(Debug, Clone, Copy)]
pub struct SizeImportance<'a> {
    report: &'a CoverageReport,
}

impl<'a> SizeImportance<'a> {
    pub fn new(report: &'a CoverageReport) -> Self {
        Self { report }
    }
}

impl Importance for SizeImportance<'_> {
    fn get_importance(&self, path: &str) -> u64 {
        self.report
            .get(path)
            .map(|cov| cov.total_lines())
            .unwrap_or(0)
    }
}
