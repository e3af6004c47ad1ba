//! git2-backed log reader
//!
//! Produces [`CommitRecord`]s for the change-history normalizer. The walk is
//! a single forward pass in commit-time order, newest first; content diffs
//! are taken against the first parent with rename detection enabled, so a
//! rename surfaces as one modification with distinct old and new paths.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{Delta, DiffFindOptions, Oid, Repository, Sort};

use crate::core::errors::Result;
use crate::history::{CommitRecord, ModificationRecord};

/// Handle to a repository's change history
pub struct GitLog {
    repo: Repository,
    workdir: PathBuf,
}

impl GitLog {
    /// Discover the repository enclosing `path`.
    ///
    /// The handle is pinned to the work tree root, wherever inside the tree
    /// `path` points. Bare repositories are rejected: there is no work tree
    /// to resolve file paths against.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("bare repository has no work tree"))?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    /// Root of the repository's work tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Walk the log from `HEAD`, newest first.
    ///
    /// `since` drops commits authored before the given instant. The iterator
    /// consumes this handle: one walk per open.
    pub fn commits(self, since: Option<DateTime<Utc>>) -> Result<LogIter> {
        let oids = {
            let mut revwalk = self.repo.revwalk()?;
            revwalk.push_head()?;
            revwalk.set_sorting(Sort::TIME)?;
            revwalk.collect::<std::result::Result<Vec<Oid>, git2::Error>>()?
        };
        log::debug!("walking {} commits", oids.len());
        Ok(LogIter {
            repo: self.repo,
            oids: oids.into_iter(),
            since,
        })
    }
}

/// Single-pass commit iterator returned by [`GitLog::commits`]
pub struct LogIter {
    repo: Repository,
    oids: std::vec::IntoIter<Oid>,
    since: Option<DateTime<Utc>>,
}

impl LogIter {
    fn materialize(&self, oid: Oid) -> Result<Option<CommitRecord>> {
        let commit = self.repo.find_commit(oid)?;
        let author = commit.author();
        let author_timestamp = timestamp_utc(author.when().seconds());
        if let Some(since) = self.since {
            if author_timestamp < since {
                return Ok(None);
            }
        }
        let record = CommitRecord {
            hash: commit.id().to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            author_timestamp,
            modifications: self.modifications(&commit)?,
        };
        Ok(Some(record))
    }

    fn modifications(&self, commit: &git2::Commit) -> Result<Vec<ModificationRecord>> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };
        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;
        Ok(diff.deltas().map(delta_to_modification).collect())
    }
}

impl Iterator for LogIter {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let oid = self.oids.next()?;
            match self.materialize(oid) {
                Ok(Some(commit)) => return Some(Ok(commit)),
                // Outside the since window
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn delta_to_modification(delta: git2::DiffDelta) -> ModificationRecord {
    let old_path = delta.old_file().path().map(path_string);
    let new_path = delta.new_file().path().map(path_string);
    // libgit2 fills both sides for added and deleted files; keep only the
    // side that exists so path fallback behaves
    match delta.status() {
        Delta::Added => ModificationRecord {
            old_path: None,
            new_path,
        },
        Delta::Deleted => ModificationRecord {
            old_path,
            new_path: None,
        },
        _ => ModificationRecord { old_path, new_path },
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn timestamp_utc(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_convert_to_utc() {
        let ts = timestamp_utc(1_700_000_000);
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_opening_a_plain_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GitLog::open(dir.path()).is_err());
    }

    #[test]
    fn test_opening_from_a_subdirectory_resolves_the_work_tree() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("src/app");
        std::fs::create_dir_all(&nested).unwrap();

        let log = GitLog::open(&nested).unwrap();
        assert_eq!(
            log.workdir().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_bare_repositories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init_bare(dir.path()).unwrap();
        assert!(GitLog::open(dir.path()).is_err());
    }
}
