//! Errors raised by the corpus graph and the rank estimators.
//!
//! Every variant is detected at the start of the offending call, before any
//! rank buffer is allocated, so callers never observe a partial mapping.

use std::fmt;

/// Broad class of a [`RankError`], with stable machine-readable codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a corpus, page or parameter the estimators reject.
    InvalidInput,
    /// The iterative solver ran out of sweeps before meeting its epsilon.
    NonConvergence,
}

impl ErrorKind {
    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::NonConvergence => "Iterative solver did not converge",
        }
    }

    /// Optional remediation hint surfaced by the CLI.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => None,
            Self::NonConvergence => {
                Some("Raise `max_sweeps` or loosen `epsilon` in the rank configuration.")
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors from corpus lookups and PageRank estimation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    /// The corpus has no pages.
    #[error("corpus is empty")]
    EmptyCorpus,

    /// The named page is not a key of the corpus.
    #[error("page not found in corpus: {0}")]
    UnknownPage(String),

    /// The damping factor is outside the open interval (0, 1).
    #[error("damping factor must lie strictly between 0 and 1, got {0}")]
    InvalidDamping(f64),

    /// The sampler was asked for zero samples.
    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    /// The convergence epsilon is zero, negative or not finite.
    #[error("convergence epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    /// The sweep cap is zero.
    #[error("sweep cap must be at least 1")]
    InvalidSweepCap,

    /// The iterative solver hit its sweep cap without converging.
    #[error("no convergence after {sweeps} sweeps (largest change in last sweep: {max_delta:e})")]
    NonConvergence {
        /// Sweeps performed before giving up.
        sweeps: usize,
        /// Largest per-page change observed in the final sweep.
        max_delta: f64,
    },
}

impl RankError {
    /// Which class of failure this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NonConvergence { .. } => ErrorKind::NonConvergence,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyCorpus => "E1001",
            Self::UnknownPage(_) => "E1002",
            Self::InvalidDamping(_) => "E1003",
            Self::InvalidSampleCount => "E1004",
            Self::InvalidEpsilon(_) => "E1005",
            Self::InvalidSweepCap => "E1006",
            Self::NonConvergence { .. } => "E2001",
        }
    }
}

/// Reject damping factors outside the open interval (0, 1).
///
/// NaN fails both comparisons and is rejected too.
pub(crate) fn check_damping(damping: f64) -> Result<(), RankError> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}
