//! Core coverage data model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Line coverage counts for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileCoverage {
    pub covered_lines: u64,
    pub missing_lines: u64,
}

impl FileCoverage {
    pub fn new(covered_lines: u64, missing_lines: u64) -> Self {
        Self {
            covered_lines,
            missing_lines,
        }
    }

    /// Total number of measurable lines
    pub fn total_lines(&self) -> u64 {
        self.covered_lines + self.missing_lines
    }

    /// Covered percentage in [0, 100]; 0.0 for files without measurable lines
    pub fn percent_covered(&self) -> f64 {
        let total = self.total_lines();
        if total == 0 {
            0.0
        } else {
            100.0 * self.covered_lines as f64 / total as f64
        }
    }
}

/// Map from file path to its line coverage.
///
/// Paths are forward-slash separated, relative or rooted as the report wrote
/// them. Built once by an importer and read-only afterwards; iteration order
/// is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    files: HashMap<String, FileCoverage>,
}

impl CoverageReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&FileCoverage> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileCoverage)> {
        self.files.iter().map(|(path, cov)| (path.as_str(), cov))
    }
}

impl FromIterator<(String, FileCoverage)> for CoverageReport {
    fn from_iter<I: IntoIterator<Item = (String, FileCoverage)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
