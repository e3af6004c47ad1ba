//! Importance scoring
//!
//! An importance score is the visual weight a file gets in the rendered
//! chart. Zero means "leave it out entirely".

pub mod recency;
pub mod size;

pub use recency::{recency_score, RecencyImportance, BASE_IMPORTANCE};
pub use size::SizeImportance;

/// Scores a file's visual weight
pub trait Importance {
    fn get_importance(&self, path: &str) -> u64;
}
