//! File import/export for matcher output and fusion parameters.

pub mod config;
pub mod matches_csv;

pub use config::FusionConfig;
pub use matches_csv::{load_pairwise_matches, save_pairwise_matches};
