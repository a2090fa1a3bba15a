//! Iterative PageRank solver.
//!
//! # Algorithm
//!
//! Every page starts at `1 / N`. Each sweep recomputes every page from the
//! previous sweep's ranks:
//!
//! ```text
//! PR'(p) = (1 - d) / N + d * Σ PR(q) / out_degree(q)   for each q → p
//! ```
//!
//! Reads come only from the previous sweep's buffer; writes go to a second
//! buffer and the two are swapped after the sweep.
//!
//! # Convergence
//!
//! A sweep converges when no page moved by `epsilon` or more. If
//! `max_sweeps` sweeps pass without a converged one, the solver returns
//! [`RankError::NonConvergence`].
//!
//! # Sinks
//!
//! Pages without outbound links contribute nothing to the sum above: their
//! mass is not spread over the corpus, unlike the random-surfer transition
//! model which jumps uniformly from a sink. On corpora with sinks the
//! converged vector therefore sums to less than one. It is rescaled to sum
//! to one and the pre-scaling total is reported as
//! [`IterationReport::raw_mass`]. Because the teleport term is uniform, the
//! rescaled vector is the same stationary distribution the sampler estimates.

#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use tracing::{info, instrument, trace, warn};

use crate::config::RankConfig;
use crate::corpus::CorpusGraph;
use crate::error::RankError;
use crate::rank::RankMapping;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a converged iterative computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationReport {
    /// Converged ranks, rescaled to sum to 1.0.
    pub ranks: RankMapping,
    /// Number of sweeps performed, including the converged one.
    pub sweeps: usize,
    /// Sum of the converged ranks before rescaling. Below 1.0 when the
    /// corpus has sinks.
    pub raw_mass: f64,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Solve the PageRank equations by repeated sweeps until convergence.
///
/// # Errors
///
/// - [`RankError::EmptyCorpus`] if the corpus has no pages.
/// - [`RankError::InvalidDamping`], [`RankError::InvalidEpsilon`] or
///   [`RankError::InvalidSweepCap`] for out-of-range configuration.
/// - [`RankError::NonConvergence`] if `config.max_sweeps` sweeps pass without
///   convergence.
#[instrument(skip(corpus, config), fields(pages = corpus.len(), damping = config.damping))]
pub fn iterate_pagerank(
    corpus: &CorpusGraph,
    config: &RankConfig,
) -> Result<IterationReport, RankError> {
    if corpus.is_empty() {
        return Err(RankError::EmptyCorpus);
    }
    config.validate_iteration()?;

    let n = corpus.len();
    let sweeper = Sweeper::new(corpus, config.damping);

    let mut ranks = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];
    let mut max_delta = f64::INFINITY;

    for sweep in 1..=config.max_sweeps {
        max_delta = sweeper.sweep(&ranks, &mut next);
        std::mem::swap(&mut ranks, &mut next);
        trace!(sweep, max_delta, "sweep finished");

        if max_delta < config.epsilon {
            let raw_mass: f64 = ranks.iter().sum();
            for r in &mut ranks {
                *r /= raw_mass;
            }
            info!(sweeps = sweep, raw_mass, "iteration converged");
            return Ok(IterationReport {
                ranks: RankMapping::from_dense(corpus, &ranks),
                sweeps: sweep,
                raw_mass,
            });
        }
    }

    warn!(
        sweeps = config.max_sweeps,
        max_delta, "iteration hit sweep cap without converging"
    );
    Err(RankError::NonConvergence {
        sweeps: config.max_sweeps,
        max_delta,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Precomputed reverse adjacency and out-degrees for repeated sweeps.
struct Sweeper {
    /// Teleport term `(1 - d) / N`.
    base: f64,
    damping: f64,
    /// `incoming[p]` = indices of pages linking to `p`.
    incoming: Vec<Vec<usize>>,
    out_degrees: Vec<f64>,
}

impl Sweeper {
    fn new(corpus: &CorpusGraph, damping: f64) -> Self {
        let n = corpus.len();
        Self {
            base: (1.0 - damping) / n as f64,
            damping,
            incoming: (0..n).map(|p| corpus.predecessors(p).collect()).collect(),
            out_degrees: (0..n).map(|q| corpus.out_degree_at(q) as f64).collect(),
        }
    }

    /// Write one sweep's ranks into `next`, reading only `ranks`. Returns the
    /// largest absolute change of any page.
    fn sweep(&self, ranks: &[f64], next: &mut [f64]) -> f64 {
        let mut max_delta = 0.0_f64;
        for (p, slot) in next.iter_mut().enumerate() {
            // Any q in incoming[p] has at least the edge q → p.
            let inflow: f64 = self.incoming[p]
                .iter()
                .map(|&q| ranks[q] / self.out_degrees[q])
                .sum();
            let rank = self.base + self.damping * inflow;
            max_delta = max_delta.max((rank - ranks[p]).abs());
            *slot = rank;
        }
        max_delta
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
