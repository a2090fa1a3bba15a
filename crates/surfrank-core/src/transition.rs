//! The random-surfer transition model.
//!
//! From page `p` with damping factor `d` over a corpus of `N` pages:
//!
//! ```text
//! P(p → k) = 1 / N                                   if p is a sink
//! P(p → k) = (1 - d) / N + [k ∈ links(p)] · d / L    otherwise, L = |links(p)|
//! ```
//!
//! The jump term and the link term are additive: a linked-to page receives
//! both.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use crate::corpus::{CorpusGraph, Page};
use crate::error::{RankError, check_damping};

/// Probability of moving to each page of the corpus from a given page.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionDistribution {
    probabilities: BTreeMap<Page, f64>,
}

impl TransitionDistribution {
    /// Probability of moving to `page`, or `None` if it is not in the corpus.
    #[must_use]
    pub fn probability(&self, page: &str) -> Option<f64> {
        self.probabilities.get(page).copied()
    }

    /// `(page, probability)` pairs in ascending page order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probabilities.iter().map(|(p, &v)| (p.as_str(), v))
    }

    /// Number of pages covered (always the corpus size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether the distribution is empty. Never true for a value returned by
    /// [`transition_model`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities (1.0 up to rounding).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }
}

/// Next-page distribution for a surfer currently on `page`.
///
/// # Errors
///
/// - [`RankError::EmptyCorpus`] if the corpus has no pages.
/// - [`RankError::UnknownPage`] if `page` is not in the corpus.
/// - [`RankError::InvalidDamping`] if `damping` is not in (0, 1).
pub fn transition_model(
    corpus: &CorpusGraph,
    page: &str,
    damping: f64,
) -> Result<TransitionDistribution, RankError> {
    if corpus.is_empty() {
        return Err(RankError::EmptyCorpus);
    }
    check_damping(damping)?;
    let idx = corpus
        .index_of(page)
        .ok_or_else(|| RankError::UnknownPage(page.to_string()))?;

    let weights = transition_weights(corpus, idx, damping);
    let probabilities = weights
        .into_iter()
        .enumerate()
        .map(|(i, w)| (corpus.page_at(i).to_string(), w))
        .collect();

    Ok(TransitionDistribution { probabilities })
}

/// Index-based form of [`transition_model`]: `weights[k]` is the probability
/// of moving from page `idx` to page `k`.
///
/// Inputs are assumed valid (non-empty corpus, `idx < N`, damping in range).
pub(crate) fn transition_weights(corpus: &CorpusGraph, idx: usize, damping: f64) -> Vec<f64> {
    let n = corpus.len() as f64;
    let out_degree = corpus.out_degree_at(idx);

    if out_degree == 0 {
        return vec![1.0 / n; corpus.len()];
    }

    let mut weights = vec![(1.0 - damping) / n; corpus.len()];
    let share = damping / out_degree as f64;
    for target in corpus.successors(idx) {
        weights[target] += share;
    }
    weights
}
