//! covmap turns coverage reports and a repository's change history into the
//! importance-weighted table behind sunburst/treemap coverage charts: area
//! follows importance, color follows coverage percentage.
//!
//! The pipeline: import a [`CoverageReport`] from JSON or Cobertura XML,
//! stream the git log through commit and modification
//! [filter chains](history::filters), fold the surviving changes into a
//! last-modified index, score each file with an [`Importance`] implementation
//! ([`RecencyImportance`] or [`SizeImportance`]) and project the flat table a
//! renderer consumes.
//!
//! ```no_run
//! use covmap::{fold_last_modified, import_json, stream_changes};
//! use covmap::{HistoryConfig, RecencyImportance};
//! use chrono::Utc;
//! use std::path::Path;
//!
//! # fn main() -> covmap::Result<()> {
//! let report = import_json(&std::fs::read_to_string("coverage.json")?)?;
//!
//! let history = HistoryConfig::default();
//! let repo_root = Path::new(".");
//! let changes = stream_changes(
//!     repo_root,
//!     history.commit_chain(),
//!     history.modification_chain()?,
//!     history.since(Utc::now()),
//! )?;
//! let index = fold_last_modified(changes)?;
//!
//! let importance = RecencyImportance::new(repo_root, index);
//! let table = covmap::project_importance(&report, &importance);
//! covmap::write_table(&mut std::io::stdout(), &table)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod history;
pub mod importance;
pub mod output;
pub mod report;
pub mod testkit;

// Re-export the public surface
pub use crate::config::{Config, HistoryConfig, ReportConfig};
pub use crate::core::errors::{Error, Result};
pub use crate::core::types::{CoverageReport, FileCoverage};
pub use crate::history::filters::{FilterChain, FilterResult, FilterRule, Verdict};
pub use crate::history::{
    fold_last_modified, stream_changes, ChangeStream, CommitRecord, LastModifiedIndex,
    ModificationRecord, NormalizedChange,
};
pub use crate::importance::{Importance, RecencyImportance, SizeImportance};
pub use crate::output::{project_importance, project_total_lines, ProjectedRecord};
pub use crate::output::{table_rows, write_table};
pub use crate::report::{import_json, import_json_with, import_xml, import_xml_with};
