//! Rank mappings: the value both estimators return.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::corpus::{CorpusGraph, Page};

/// Page → PageRank estimate. Scores lie in `[0, 1]` and sum to 1.0 within
/// floating-point tolerance. Iteration order is ascending page name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankMapping {
    ranks: BTreeMap<Page, f64>,
}

impl RankMapping {
    /// Pair dense per-index scores with the corpus page names.
    pub(crate) fn from_dense(corpus: &CorpusGraph, scores: &[f64]) -> Self {
        let ranks = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| (corpus.page_at(i).to_string(), score))
            .collect();
        Self { ranks }
    }

    /// Score for `page`, or `None` if it is not in the mapping.
    #[must_use]
    pub fn get(&self, page: &str) -> Option<f64> {
        self.ranks.get(page).copied()
    }

    /// `(page, score)` pairs in ascending page order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ranks.iter().map(|(p, &s)| (p.as_str(), s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Sum of all scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Largest absolute per-page difference between two mappings.
    ///
    /// Returns `None` if the mappings do not cover the same pages.
    #[must_use]
    pub fn max_abs_difference(&self, other: &Self) -> Option<f64> {
        if self.ranks.len() != other.ranks.len() {
            return None;
        }
        self.ranks.iter().try_fold(0.0_f64, |acc, (page, &a)| {
            other.ranks.get(page).map(|&b| acc.max((a - b).abs()))
        })
    }

    /// Consume the mapping, yielding the underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<Page, f64> {
        self.ranks
    }
}

impl fmt::Display for RankMapping {
    /// One `  page: 0.1234` line per page, alphabetically.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, score) in self.iter() {
            writeln!(f, "  {page}: {score:.4}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, f64)]) -> RankMapping {
        RankMapping {
            ranks: pairs.iter().map(|(p, s)| ((*p).to_string(), *s)).collect(),
        }
    }

    #[test]
    fn display_is_sorted_with_four_decimals() {
        let m = mapping(&[("b.html", 0.25), ("a.html", 0.75)]);
        assert_eq!(m.to_string(), "  a.html: 0.7500\n  b.html: 0.2500\n");
    }

    #[test]
    fn total_sums_scores() {
        let m = mapping(&[("a", 0.2), ("b", 0.3), ("c", 0.5)]);
        assert!((m.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_abs_difference_compares_matching_pages() {
        let a = mapping(&[("x", 0.4), ("y", 0.6)]);
        let b = mapping(&[("x", 0.45), ("y", 0.55)]);
        let diff = a.max_abs_difference(&b).expect("same pages");
        assert!((diff - 0.05).abs() < 1e-12);
    }

    #[test]
    fn max_abs_difference_rejects_mismatched_pages() {
        let a = mapping(&[("x", 0.5), ("y", 0.5)]);
        let b = mapping(&[("x", 0.5), ("z", 0.5)]);
        let c = mapping(&[("x", 1.0)]);
        assert_eq!(a.max_abs_difference(&b), None);
        assert_eq!(a.max_abs_difference(&c), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let m = mapping(&[("a", 0.5), ("b", 0.5)]);
        let value = toml::Value::try_from(&m).expect("serializable");
        assert_eq!(value.get("a").and_then(toml::Value::as_float), Some(0.5));
    }
}
