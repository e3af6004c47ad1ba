//! Change-history normalization
//!
//! Streams a version-control log through two filter chains (commit-level,
//! then modification-level) and folds the surviving changes into a per-path
//! last-modified index. The stream is lazy and single-pass; callers that
//! need more than one traversal must materialize it.

pub mod filters;
pub mod git;

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use filters::{FilterChain, Verdict};

/// One file touched by a commit, named as the VCS reports it on both sides
/// of the change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationRecord {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
}

impl ModificationRecord {
    /// The path identifying this modification: the pre-change name when the
    /// VCS knows it, the post-change name otherwise
    pub fn path(&self) -> Option<&str> {
        self.old_path.as_deref().or(self.new_path.as_deref())
    }
}

/// One commit from the log together with the files it touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub author_timestamp: DateTime<Utc>,
    pub modifications: Vec<ModificationRecord>,
}

/// A (commit, modified file) pair that survived both filter chains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedChange {
    pub hash: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub author_timestamp: DateTime<Utc>,
    pub path: String,
}

impl NormalizedChange {
    fn from_modification(commit: &CommitRecord, modification: &ModificationRecord) -> Option<Self> {
        let path = modification.path()?.to_string();
        Some(Self {
            hash: commit.hash.clone(),
            message: commit.message.clone(),
            author_name: commit.author_name.clone(),
            author_email: commit.author_email.clone(),
            author_timestamp: commit.author_timestamp,
            path,
        })
    }
}

/// Per-path maximum author timestamp over the surviving changes
pub type LastModifiedIndex = HashMap<String, DateTime<Utc>>;

/// Lazily turns a commit iterator into normalized changes.
///
/// The commit chain is resolved once per commit; an excluded commit's
/// modifications are never offered to the modification chain. After yielding
/// an error the stream fuses and returns `None` from then on.
pub struct ChangeStream<I> {
    commits: I,
    commit_chain: FilterChain<CommitRecord>,
    modification_chain: FilterChain<ModificationRecord>,
    current: Option<(CommitRecord, std::vec::IntoIter<ModificationRecord>)>,
    done: bool,
}

impl<I> ChangeStream<I>
where
    I: Iterator<Item = Result<CommitRecord>>,
{
    pub fn new(
        commits: I,
        commit_chain: FilterChain<CommitRecord>,
        modification_chain: FilterChain<ModificationRecord>,
    ) -> Self {
        Self {
            commits,
            commit_chain,
            modification_chain,
            current: None,
            done: false,
        }
    }
}

impl<I> Iterator for ChangeStream<I>
where
    I: Iterator<Item = Result<CommitRecord>>,
{
    type Item = Result<NormalizedChange>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some((commit, modifications)) = self.current.as_mut() {
                while let Some(modification) = modifications.next() {
                    match self.modification_chain.resolve(&modification) {
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                        Ok(Verdict::Exclude) => continue,
                        Ok(Verdict::Include) => {
                            match NormalizedChange::from_modification(commit, &modification) {
                                Some(change) => return Some(Ok(change)),
                                None => {
                                    log::warn!(
                                        "skipping modification without any path in commit {}",
                                        commit.hash
                                    );
                                    continue;
                                }
                            }
                        }
                    }
                }
                self.current = None;
            }
            match self.commits.next() {
                None => return None,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(mut commit)) => match self.commit_chain.resolve(&commit) {
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    Ok(Verdict::Exclude) => continue,
                    Ok(Verdict::Include) => {
                        let modifications = std::mem::take(&mut commit.modifications).into_iter();
                        self.current = Some((commit, modifications));
                    }
                },
            }
        }
    }
}

/// Open the repository containing `repo_root` and stream its filtered changes
/// newest-first.
///
/// Opening failures surface as
/// [`Error::HistoryUnavailable`](crate::core::errors::Error); callers may
/// degrade recency scoring to all-zero on that, the stream itself never does.
pub fn stream_changes(
    repo_root: &Path,
    commit_chain: FilterChain<CommitRecord>,
    modification_chain: FilterChain<ModificationRecord>,
    since: Option<DateTime<Utc>>,
) -> Result<ChangeStream<git::LogIter>> {
    let commits = git::GitLog::open(repo_root)?.commits(since)?;
    Ok(ChangeStream::new(commits, commit_chain, modification_chain))
}

/// Drain a change stream into the latest author timestamp per path.
///
/// The fold is total: the first error aborts it. Every path starts from the
/// minimum representable timestamp, so any real change raises it.
pub fn fold_last_modified<I>(changes: I) -> Result<LastModifiedIndex>
where
    I: IntoIterator<Item = Result<NormalizedChange>>,
{
    let mut index = LastModifiedIndex::new();
    let mut count = 0usize;
    for change in changes {
        let change = change?;
        let timestamp = change.author_timestamp;
        let entry = index.entry(change.path).or_insert(DateTime::<Utc>::MIN_UTC);
        *entry = (*entry).max(timestamp);
        count += 1;
    }
    log::debug!(
        "folded {count} changes into {} last-modified entries",
        index.len()
    );
    Ok(index)
}
