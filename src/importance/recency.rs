//! Recency-weighted importance
//!
//! Scores `recency_factor * filesize_factor`: a reciprocal weekly decay from
//! the last time the change history touched a path, times the file's byte
//! size on disk. Paths the history never touched score zero, as do files
//! that no longer exist in the working tree.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::Importance;
use crate::config::HistoryConfig;
use crate::core::errors::Result;
use crate::history::git::GitLog;
use crate::history::{fold_last_modified, ChangeStream, LastModifiedIndex};

/// Score assigned to paths modified within the current week
pub const BASE_IMPORTANCE: u64 = 1000;

/// Reciprocal weekly decay from the last modification.
///
/// The decay is deliberately coarse: whole weeks only, flat at
/// [`BASE_IMPORTANCE`] during the first week, and integer floor afterwards.
/// Timestamps in the future also score the base.
pub fn recency_score(last_modified: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let weeks = (now - last_modified).num_days() / 7;
    if weeks <= 0 {
        BASE_IMPORTANCE
    } else {
        BASE_IMPORTANCE / weeks as u64
    }
}

/// Recency-times-size importance over a folded change history
#[derive(Debug, Clone)]
pub struct RecencyImportance {
    repo_root: PathBuf,
    index: LastModifiedIndex,
    now: DateTime<Utc>,
}

impl RecencyImportance {
    /// Score against a prebuilt index; "now" is evaluated at construction
    pub fn new(repo_root: impl Into<PathBuf>, index: LastModifiedIndex) -> Self {
        Self::with_now(repo_root, index, Utc::now())
    }

    /// Score with an explicit evaluation instant
    pub fn with_now(
        repo_root: impl Into<PathBuf>,
        index: LastModifiedIndex,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            index,
            now,
        }
    }

    /// Stream the repository's history through `config`'s chains and fold it
    /// into the index. The stream is drained completely before this returns.
    ///
    /// `repo_root` may be any directory inside the repository; file sizes
    /// are read relative to the discovered work tree root.
    pub fn from_repo(repo_root: &Path, config: &HistoryConfig) -> Result<Self> {
        let now = Utc::now();
        let log = GitLog::open(repo_root)?;
        let workdir = log.workdir().to_path_buf();
        let commits = log.commits(config.since(now))?;
        let changes = ChangeStream::new(
            commits,
            config.commit_chain(),
            config.modification_chain()?,
        );
        let index = fold_last_modified(changes)?;
        Ok(Self::with_now(workdir, index, now))
    }

    fn file_size(&self, path: &str) -> u64 {
        let full = self.repo_root.join(path);
        match fs::metadata(&full) {
            Ok(meta) => meta.len(),
            Err(e) => {
                log::warn!("cannot stat {}: {e}", full.display());
                0
            }
        }
    }
}

impl Importance for RecencyImportance {
    fn get_importance(&self, path: &str) -> u64 {
        let Some(&last_modified) = self.index.get(path) else {
            return 0;
        };
        recency_score(last_modified, self.now) * self.file_size(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_same_week_scores_the_base() {
        let now = fixed_now();
        assert_eq!(recency_score(now, now), 1000);
        assert_eq!(recency_score(now - Duration::days(6), now), 1000);
    }

    #[test]
    fn test_decay_divides_by_whole_weeks() {
        let now = fixed_now();
        assert_eq!(recency_score(now - Duration::days(7), now), 1000);
        assert_eq!(recency_score(now - Duration::days(14), now), 500);
        assert_eq!(recency_score(now - Duration::days(21), now), 333);
        assert_eq!(recency_score(now - Duration::days(28), now), 250);
    }

    #[test]
    fn test_future_timestamps_score_the_base() {
        let now = fixed_now();
        assert_eq!(recency_score(now + Duration::days(30), now), 1000);
    }

    #[test]
    fn test_very_old_timestamps_decay_to_zero() {
        let now = fixed_now();
        assert_eq!(recency_score(now - Duration::weeks(2000), now), 0);
    }

    #[test]
    fn test_minimum_sentinel_scores_zero() {
        assert_eq!(recency_score(DateTime::<Utc>::MIN_UTC, fixed_now()), 0);
    }
}
