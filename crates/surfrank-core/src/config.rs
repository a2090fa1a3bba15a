//! Estimator configuration.
//!
//! A [`RankConfig`] carries every tunable the estimators read. It is passed
//! explicitly to each call; there is no process-wide state. Config files are
//! TOML with every field optional:
//!
//! ```toml
//! damping = 0.85
//! samples = 10000
//! epsilon = 0.001
//! max_sweeps = 10000
//! seed = 42
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{RankError, check_damping};

/// File name looked up inside a corpus directory.
pub const CORPUS_CONFIG_FILE: &str = "surfrank.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping at random.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Number of random-walk steps taken by the sampler.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// A sweep converges when no page moves by this much or more.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Sweeps allowed before the iterative solver reports non-convergence.
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
    /// Seed for the sampler. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            samples: default_samples(),
            epsilon: default_epsilon(),
            max_sweeps: default_max_sweeps(),
            seed: None,
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_samples() -> usize {
    10_000
}

const fn default_epsilon() -> f64 {
    0.001
}

const fn default_max_sweeps() -> usize {
    10_000
}

impl RankConfig {
    /// Check every field against the ranges the estimators accept.
    ///
    /// # Errors
    ///
    /// Returns the first [`RankError`] found: damping, then samples, then
    /// epsilon, then the sweep cap.
    pub fn validate(&self) -> Result<(), RankError> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(RankError::InvalidSampleCount);
        }
        self.validate_iteration()
    }

    /// Validate only the fields the iterative solver reads.
    pub(crate) fn validate_iteration(&self) -> Result<(), RankError> {
        check_damping(self.damping)?;
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(RankError::InvalidEpsilon(self.epsilon));
        }
        if self.max_sweeps == 0 {
            return Err(RankError::InvalidSweepCap);
        }
        Ok(())
    }

    /// Parse a TOML config string. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse rank config")
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `surfrank.toml` from a corpus directory, or the defaults if the
    /// directory has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_for_corpus(corpus_dir: &Path) -> Result<Self> {
        let path = corpus_dir.join(CORPUS_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}
