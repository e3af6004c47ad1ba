//! Tri-state filter rules and first-decisive-wins chains
//!
//! Rules vote [`Include`](FilterResult::Include),
//! [`Exclude`](FilterResult::Exclude) or abstain; a chain takes the first
//! non-abstaining vote in caller order. Chains are meant to end in a
//! catch-all rule: running out of rules is a configuration defect and
//! resolves to [`Error::UnresolvedFilter`](crate::core::errors::Error).

use glob::Pattern;

use crate::core::errors::{Error, Result};
use crate::history::{CommitRecord, ModificationRecord};

/// A single rule's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Include,
    Exclude,
    Undecided,
}

/// Final verdict of a resolved chain; abstention cannot escape a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Include,
    Exclude,
}

/// One voting rule over records of type `R`
pub trait FilterRule<R> {
    fn evaluate(&self, record: &R) -> FilterResult;
}

/// Ordered rules resolved first-decisive-wins
pub struct FilterChain<R> {
    rules: Vec<Box<dyn FilterRule<R>>>,
}

impl<R> FilterChain<R> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; rules vote in the order they were appended
    pub fn rule(mut self, rule: impl FilterRule<R> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the chain for one record, short-circuiting on the first
    /// decisive rule
    pub fn resolve(&self, record: &R) -> Result<Verdict>
    where
        R: std::fmt::Debug,
    {
        for rule in &self.rules {
            match rule.evaluate(record) {
                FilterResult::Include => return Ok(Verdict::Include),
                FilterResult::Exclude => return Ok(Verdict::Exclude),
                FilterResult::Undecided => {}
            }
        }
        Err(Error::unresolved_filter(record))
    }
}

impl<R> Default for FilterChain<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Excludes commits whose author name or email contains a fragment
#[derive(Debug, Clone)]
pub struct ExcludeAuthor {
    fragment: String,
}

impl ExcludeAuthor {
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl FilterRule<CommitRecord> for ExcludeAuthor {
    fn evaluate(&self, commit: &CommitRecord) -> FilterResult {
        if commit.author_name.contains(&self.fragment)
            || commit.author_email.contains(&self.fragment)
        {
            FilterResult::Exclude
        } else {
            FilterResult::Undecided
        }
    }
}

/// Excludes commits whose message contains a fragment
#[derive(Debug, Clone)]
pub struct ExcludeMessage {
    fragment: String,
}

impl ExcludeMessage {
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl FilterRule<CommitRecord> for ExcludeMessage {
    fn evaluate(&self, commit: &CommitRecord) -> FilterResult {
        if commit.message.contains(&self.fragment) {
            FilterResult::Exclude
        } else {
            FilterResult::Undecided
        }
    }
}

/// Catch-all commit inclusion
#[derive(Debug, Clone, Copy)]
pub struct IncludeAllCommits;

impl FilterRule<CommitRecord> for IncludeAllCommits {
    fn evaluate(&self, _commit: &CommitRecord) -> FilterResult {
        FilterResult::Include
    }
}

/// Catch-all commit exclusion
#[derive(Debug, Clone, Copy)]
pub struct ExcludeAllCommits;

impl FilterRule<CommitRecord> for ExcludeAllCommits {
    fn evaluate(&self, _commit: &CommitRecord) -> FilterResult {
        FilterResult::Exclude
    }
}

/// Includes modifications whose path matches a shell-style wildcard.
///
/// The pattern matches the full path and `*` crosses directory separators,
/// so `*.py` accepts `src/app.py`.
#[derive(Debug, Clone)]
pub struct IncludePath {
    pattern: Pattern,
}

impl IncludePath {
    /// Compile the wildcard; invalid patterns fail here rather than during
    /// evaluation
    pub fn glob(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }
}

impl FilterRule<ModificationRecord> for IncludePath {
    fn evaluate(&self, modification: &ModificationRecord) -> FilterResult {
        match modification.path() {
            Some(path) if self.pattern.matches(path) => FilterResult::Include,
            _ => FilterResult::Undecided,
        }
    }
}

/// Catch-all modification inclusion
#[derive(Debug, Clone, Copy)]
pub struct IncludeAllModifications;

impl FilterRule<ModificationRecord> for IncludeAllModifications {
    fn evaluate(&self, _modification: &ModificationRecord) -> FilterResult {
        FilterResult::Include
    }
}

/// Catch-all modification exclusion
#[derive(Debug, Clone, Copy)]
pub struct ExcludeAllModifications;

impl FilterRule<ModificationRecord> for ExcludeAllModifications {
    fn evaluate(&self, _modification: &ModificationRecord) -> FilterResult {
        FilterResult::Exclude
    }
}
