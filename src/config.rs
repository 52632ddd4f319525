use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::random::RandomState;

/// Settings for drawing a class-balanced set of example indices.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub n_examples: usize,

    /// Fixed seed; `None` draws a fresh generator from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Rows that must never be returned (e.g. already used for training).
    #[serde(default)]
    pub forbidden_indices: Vec<usize>,
}

impl SamplingConfig {
    pub fn new(n_examples: usize, seed: Option<u64>) -> Self {
        Self {
            n_examples,
            seed,
            forbidden_indices: Vec::new(),
        }
    }

    pub fn random_state(&self) -> RandomState {
        RandomState::from(self.seed)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse sampling config JSON")
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read sampling config: {}", path.as_ref().display())
        })?;
        Self::from_json_str(&raw)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            n_examples: 5,
            seed: None,
            forbidden_indices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_default() {
        let cfg = SamplingConfig::from_json_str(r#"{"n_examples": 10}"#).unwrap();
        assert_eq!(cfg.n_examples, 10);
        assert_eq!(cfg.seed, None);
        assert!(cfg.forbidden_indices.is_empty());
    }

    #[test]
    fn test_invalid_json_errors() {
        assert!(SamplingConfig::from_json_str("{n_examples: }").is_err());
    }
}
