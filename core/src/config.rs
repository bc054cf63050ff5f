//! Configuration for the supersequence engine.
//!
//! `SequenceConfig` centralizes all heuristic thresholds and behavioral knobs
//! to avoid hardcoded constants scattered throughout the passes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Minimum similarity ratio for two phrases to count as isomorphic.
    pub isomorphism_ratio_threshold: f64,
    /// Ratios in isomorphism keys are rounded to `1 / ratio_key_scale`.
    pub ratio_key_scale: u32,
    /// Pair comparisons between two progress reports while grouping.
    pub progress_every_pairs: u32,
    /// Upper bound on coarse filter passes before giving up on a fixpoint.
    pub max_coarse_passes: u32,
    pub enable_fine_redundancy: bool,
    pub enable_substring_merging: bool,
    pub timeout_seconds: Option<u32>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            isomorphism_ratio_threshold: 0.6,
            ratio_key_scale: 1_000_000,
            progress_every_pairs: 1_000,
            max_coarse_passes: 16,
            enable_fine_redundancy: true,
            enable_substring_merging: false,
            timeout_seconds: None,
        }
    }
}

impl SequenceConfig {
    pub fn fastest() -> Self {
        Self {
            enable_fine_redundancy: false,
            enable_substring_merging: false,
            ..Default::default()
        }
    }

    pub fn balanced() -> Self {
        Self::default()
    }

    pub fn most_thorough() -> Self {
        Self {
            enable_fine_redundancy: true,
            enable_substring_merging: true,
            ..Default::default()
        }
    }

    pub fn builder() -> SequenceConfigBuilder {
        SequenceConfigBuilder {
            inner: SequenceConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.isomorphism_ratio_threshold.is_finite()
            || self.isomorphism_ratio_threshold < 0.0
            || self.isomorphism_ratio_threshold > 1.0
        {
            return Err(ConfigError::InvalidRatioThreshold {
                value: self.isomorphism_ratio_threshold,
            });
        }

        ensure_non_zero_u32(self.ratio_key_scale, "ratio_key_scale")?;
        ensure_non_zero_u32(self.progress_every_pairs, "progress_every_pairs")?;
        ensure_non_zero_u32(self.max_coarse_passes, "max_coarse_passes")?;
        if let Some(secs) = self.timeout_seconds {
            ensure_non_zero_u32(secs, "timeout_seconds")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("isomorphism_ratio_threshold must be in [0.0, 1.0] and finite (got {value})")]
    InvalidRatioThreshold { value: f64 },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
}

fn ensure_non_zero_u32(value: u32, field: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveLimit {
            field,
            value: value as u64,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SequenceConfigBuilder {
    inner: SequenceConfig,
}

impl Default for SequenceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceConfigBuilder {
    pub fn new() -> Self {
        SequenceConfig::builder()
    }

    pub fn isomorphism_ratio_threshold(mut self, value: f64) -> Self {
        self.inner.isomorphism_ratio_threshold = value;
        self
    }

    pub fn ratio_key_scale(mut self, value: u32) -> Self {
        self.inner.ratio_key_scale = value;
        self
    }

    pub fn progress_every_pairs(mut self, value: u32) -> Self {
        self.inner.progress_every_pairs = value;
        self
    }

    pub fn max_coarse_passes(mut self, value: u32) -> Self {
        self.inner.max_coarse_passes = value;
        self
    }

    pub fn enable_fine_redundancy(mut self, value: bool) -> Self {
        self.inner.enable_fine_redundancy = value;
        self
    }

    pub fn enable_substring_merging(mut self, value: bool) -> Self {
        self.inner.enable_substring_merging = value;
        self
    }

    pub fn timeout_seconds(mut self, value: Option<u32>) -> Self {
        self.inner.timeout_seconds = value;
        self
    }

    pub fn build(self) -> Result<SequenceConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
