//! Random-surfer PageRank estimate.
//!
//! # Algorithm
//!
//! Start on a page chosen uniformly at random. For each of `n` steps, tally
//! the current page, then move to a page drawn from the transition model of
//! the current page. The estimate for a page is its share of the `n` visits.
//!
//! Visits are counted as integers and divided by `n` once at the end, so the
//! estimate sums to 1.0 up to a single rounding per page.
//!
//! The estimate is noisy: it converges to the stationary distribution of the
//! transition model only as `n` grows. Callers that need reproducibility pass
//! a seeded RNG to [`sample_pagerank_with`] or set [`RankConfig::seed`].

#![allow(clippy::cast_precision_loss)]

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

use crate::choice::weighted_choice;
use crate::config::RankConfig;
use crate::corpus::CorpusGraph;
use crate::error::{RankError, check_damping};
use crate::rank::RankMapping;
use crate::transition::transition_weights;

/// Estimate PageRank by sampling `config.samples` steps of a random walk.
///
/// Seeds the walk from `config.seed` when set, otherwise from OS entropy.
///
/// # Errors
///
/// - [`RankError::EmptyCorpus`] if the corpus has no pages.
/// - [`RankError::InvalidDamping`] if `config.damping` is not in (0, 1).
/// - [`RankError::InvalidSampleCount`] if `config.samples` is zero.
#[instrument(skip(corpus, config), fields(pages = corpus.len(), samples = config.samples))]
pub fn sample_pagerank(
    corpus: &CorpusGraph,
    config: &RankConfig,
) -> Result<RankMapping, RankError> {
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    sample_pagerank_with(corpus, config.damping, config.samples, &mut rng)
}

/// Estimate PageRank by sampling `samples` steps of a random walk driven by
/// `rng`.
///
/// # Errors
///
/// Same as [`sample_pagerank`].
pub fn sample_pagerank_with<R: Rng>(
    corpus: &CorpusGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<RankMapping, RankError> {
    if corpus.is_empty() {
        return Err(RankError::EmptyCorpus);
    }
    check_damping(damping)?;
    if samples == 0 {
        return Err(RankError::InvalidSampleCount);
    }

    let n = corpus.len();
    if n == 1 {
        return Ok(RankMapping::from_dense(corpus, &[1.0]));
    }

    let mut visits = vec![0_usize; n];
    let mut current = rng.gen_range(0..n);
    for _ in 0..samples {
        visits[current] += 1;
        let weights = transition_weights(corpus, current, damping);
        // Every weight is at least (1 - d) / N > 0, so a draw always succeeds.
        current = weighted_choice(&weights, rng).unwrap_or(current);
    }

    let total = samples as f64;
    let scores: Vec<f64> = visits.iter().map(|&v| v as f64 / total).collect();

    debug!(pages = n, samples, "sampling complete");
    Ok(RankMapping::from_dense(corpus, &scores))
}
