//! Fusion parameters for the command-line front-end.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::fusion::DEFAULT_MIN_TRACK_LENGTH;

/// Filter thresholds applied after building tracks.
///
/// ```yaml
/// min_track_length: 3
/// min_pair_occurrences: 10
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FusionConfig {
    /// Minimum number of distinct views per surviving track.
    #[serde(default = "default_min_track_length")]
    pub min_track_length: usize,
    /// Pairwise-support threshold; omit to skip the support filter.
    #[serde(default)]
    pub min_pair_occurrences: Option<usize>,
}

fn default_min_track_length() -> usize {
    DEFAULT_MIN_TRACK_LENGTH
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            min_track_length: DEFAULT_MIN_TRACK_LENGTH,
            min_pair_occurrences: None,
        }
    }
}

impl FusionConfig {
    /// Load the configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: FusionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.min_track_length, DEFAULT_MIN_TRACK_LENGTH);
        assert_eq!(config.min_pair_occurrences, None);
    }

    #[test]
    fn test_full_config() {
        let config: FusionConfig =
            serde_yaml::from_str("min_track_length: 3\nmin_pair_occurrences: 10\n").unwrap();
        assert_eq!(config.min_track_length, 3);
        assert_eq!(config.min_pair_occurrences, Some(10));
    }
}
