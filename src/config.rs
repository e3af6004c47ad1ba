//! Library configuration
//!
//! Defaults mirror the documented recency pipeline: ignore bot authors and
//! formatter commits, follow Python sources only, look one year back. Every
//! field has a serde default, so a TOML file only has to name what it
//! overrides.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::{Error, Result};
use crate::history::filters::{
    ExcludeAllModifications, ExcludeAuthor, ExcludeMessage, FilterChain, IncludeAllCommits,
    IncludePath,
};
use crate::history::{CommitRecord, ModificationRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Parse a TOML configuration string
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Configuration(format!("invalid config: {e}")))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Importer behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Keep entries with no measurable lines
    #[serde(default = "default_true")]
    pub include_zero_coverage_files: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_zero_coverage_files: default_true(),
        }
    }
}

/// Change-history filtering for the recency scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Commits whose author name or email contains any fragment are dropped
    #[serde(default = "default_exclude_authors")]
    pub exclude_authors: Vec<String>,

    /// Commits whose message contains any fragment are dropped
    #[serde(default = "default_exclude_messages")]
    pub exclude_messages: Vec<String>,

    /// Path globs whose modifications count toward recency
    #[serde(default = "default_include_paths")]
    pub include_paths: Vec<String>,

    /// History window in days back from now; `None` disables the cutoff
    #[serde(default = "default_since_days")]
    pub since_days: Option<i64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            exclude_authors: default_exclude_authors(),
            exclude_messages: default_exclude_messages(),
            include_paths: default_include_paths(),
            since_days: default_since_days(),
        }
    }
}

impl HistoryConfig {
    /// Commit chain: configured exclusions, then include everything else
    pub fn commit_chain(&self) -> FilterChain<CommitRecord> {
        let mut chain = FilterChain::new();
        for fragment in &self.exclude_authors {
            chain = chain.rule(ExcludeAuthor::contains(fragment.as_str()));
        }
        for fragment in &self.exclude_messages {
            chain = chain.rule(ExcludeMessage::contains(fragment.as_str()));
        }
        chain.rule(IncludeAllCommits)
    }

    /// Modification chain: configured path globs, then exclude everything else
    pub fn modification_chain(&self) -> Result<FilterChain<ModificationRecord>> {
        let mut chain = FilterChain::new();
        for pattern in &self.include_paths {
            chain = chain.rule(IncludePath::glob(pattern)?);
        }
        Ok(chain.rule(ExcludeAllModifications))
    }

    /// The history cutoff relative to `now`
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.since_days.map(|days| now - Duration::days(days))
    }
}

fn default_true() -> bool {
    true
}

fn default_exclude_authors() -> Vec<String> {
    vec!["bot".to_string()]
}

fn default_exclude_messages() -> Vec<String> {
    vec!["yapf".to_string(), "literals".to_string()]
}

fn default_include_paths() -> Vec<String> {
    vec!["*.py".to_string()]
}

fn default_since_days() -> Option<i64> {
    Some(365)
}
