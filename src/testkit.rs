//! Builders and seedable fakes for history records.
//!
//! Everything here is reproducible: randomized helpers draw from fixed pools
//! through a caller-provided RNG, so the same seed always yields the same
//! fixture. Used by this crate's tests and benches; shipped because fake
//! change histories are useful to anyone testing against the filter chains.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;

use crate::history::{CommitRecord, ModificationRecord};

const FAKE_AUTHORS: &[(&str, &str)] = &[
    ("Alice Example", "alice@example.com"),
    ("Bob Example", "bob@example.com"),
    ("Carol Example", "carol@example.com"),
    ("release-bot", "bot@example.com"),
];

const FAKE_MESSAGES: &[&str] = &[
    "Add a new feature",
    "Fix edge case in importer",
    "Apply yapf formatting",
    "Refactor internals",
    "Update dependencies",
];

const FAKE_PATHS: &[&str] = &[
    "src/app.py",
    "src/util.py",
    "src/models.py",
    "docs/readme.md",
    "tests/test_app.py",
];

const HEX: &[u8] = b"0123456789abcdef";

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Fluent commit builder with fixed, boring defaults
#[derive(Debug, Clone)]
pub struct CommitBuilder {
    commit: CommitRecord,
}

impl CommitBuilder {
    pub fn new() -> Self {
        Self {
            commit: CommitRecord {
                hash: "b5597eafcaf381102a21162912af88e36d0ba92b".to_string(),
                message: "Add a new feature".to_string(),
                author_name: "John Doe".to_string(),
                author_email: "john.doe@example.com".to_string(),
                author_timestamp: fixed_timestamp(),
                modifications: Vec::new(),
            },
        }
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.commit.hash = hash.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.commit.message = message.into();
        self
    }

    pub fn author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.commit.author_name = name.into();
        self.commit.author_email = email.into();
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.commit.author_timestamp = timestamp;
        self
    }

    /// Add an in-place modification of `path`
    pub fn modification(self, path: &str) -> Self {
        self.record(modification(path))
    }

    pub fn record(mut self, record: ModificationRecord) -> Self {
        self.commit.modifications.push(record);
        self
    }

    pub fn build(self) -> CommitRecord {
        self.commit
    }
}

impl Default for CommitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-place edit of an existing file
pub fn modification(path: &str) -> ModificationRecord {
    ModificationRecord {
        old_path: Some(path.to_string()),
        new_path: Some(path.to_string()),
    }
}

/// Newly added file
pub fn added(path: &str) -> ModificationRecord {
    ModificationRecord {
        old_path: None,
        new_path: Some(path.to_string()),
    }
}

/// Deleted file
pub fn removed(path: &str) -> ModificationRecord {
    ModificationRecord {
        old_path: Some(path.to_string()),
        new_path: None,
    }
}

/// Renamed file
pub fn renamed(old_path: &str, new_path: &str) -> ModificationRecord {
    ModificationRecord {
        old_path: Some(old_path.to_string()),
        new_path: Some(new_path.to_string()),
    }
}

/// A commit drawn from the fixed pools; same seed, same commit
pub fn random_commit<R: Rng>(rng: &mut R) -> CommitRecord {
    let (name, email) = FAKE_AUTHORS[rng.gen_range(0..FAKE_AUTHORS.len())];
    let message = FAKE_MESSAGES[rng.gen_range(0..FAKE_MESSAGES.len())];
    let hash: String = (0..40)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect();
    let timestamp = fixed_timestamp() + Duration::days(rng.gen_range(0..365));
    let modifications = (0..rng.gen_range(1..=3))
        .map(|_| modification(FAKE_PATHS[rng.gen_range(0..FAKE_PATHS.len())]))
        .collect();
    CommitRecord {
        hash,
        message: message.to_string(),
        author_name: name.to_string(),
        author_email: email.to_string(),
        author_timestamp: timestamp,
        modifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builder_defaults_are_stable() {
        let commit = CommitBuilder::new().build();
        assert_eq!(commit.author_name, "John Doe");
        assert_eq!(commit.hash.len(), 40);
        assert!(commit.modifications.is_empty());
    }

    #[test]
    fn test_modification_helpers_expose_the_expected_path() {
        assert_eq!(modification("a.py").path(), Some("a.py"));
        assert_eq!(added("a.py").path(), Some("a.py"));
        assert_eq!(removed("a.py").path(), Some("a.py"));
        assert_eq!(renamed("old.py", "new.py").path(), Some("old.py"));
    }

    #[test]
    fn test_same_seed_same_commit() {
        let a = random_commit(&mut StdRng::seed_from_u64(7));
        let b = random_commit(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        let c = random_commit(&mut StdRng::seed_from_u64(8));
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_commits_stay_inside_the_pools() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let commit = random_commit(&mut rng);
            assert!(FAKE_MESSAGES.contains(&commit.message.as_str()));
            assert!((1..=3).contains(&commit.modifications.len()));
            assert!(commit.hash.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
