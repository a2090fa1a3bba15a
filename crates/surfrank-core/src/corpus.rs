//! The corpus link graph.
//!
//! # Overview
//!
//! A [`CorpusGraph`] is an immutable directed graph: nodes are page names and
//! an edge `A → B` means page `A` contains a link to page `B`. It is built once
//! from the output of a link extractor and then only read.
//!
//! ## Construction rules
//!
//! - Duplicate links collapse (outbound links form a set).
//! - Self-links are dropped.
//! - Links to pages that are not themselves keys of the corpus are dropped,
//!   so every edge target is a node.
//! - A page with no outbound links is a *sink*.
//!
//! ## Ordering
//!
//! Nodes are inserted in ascending page-name order, so node index `i` is the
//! `i`-th page alphabetically. The estimators iterate by index, which makes a
//! seeded random walk reproducible regardless of the order links were supplied.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::debug;

use crate::error::RankError;

/// An opaque page identifier (the document name within the corpus).
pub type Page = String;

// ---------------------------------------------------------------------------
// CorpusGraph
// ---------------------------------------------------------------------------

/// Directed graph of pages and their outbound links.
#[derive(Debug, Clone, Default)]
pub struct CorpusGraph {
    /// Nodes = page names, edges = links.
    graph: DiGraph<Page, ()>,
    /// Page name → petgraph `NodeIndex`, in ascending name order.
    node_map: BTreeMap<Page, NodeIndex>,
}

impl CorpusGraph {
    /// Build a corpus from `(page, outbound links)` pairs.
    ///
    /// A page listed more than once has its link sets merged. Self-links and
    /// links to pages absent from the input are discarded.
    #[must_use]
    pub fn from_links<I, P, L, T>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<Page>,
        L: IntoIterator<Item = T>,
        T: Into<Page>,
    {
        let mut outbound: BTreeMap<Page, BTreeSet<Page>> = BTreeMap::new();
        for (page, targets) in links {
            let page = page.into();
            let targets: BTreeSet<Page> = targets
                .into_iter()
                .map(Into::into)
                .filter(|target| *target != page)
                .collect();
            outbound.entry(page).or_default().extend(targets);
        }

        let mut graph = DiGraph::with_capacity(outbound.len(), 0);
        let mut node_map = BTreeMap::new();
        for page in outbound.keys() {
            let idx = graph.add_node(page.clone());
            node_map.insert(page.clone(), idx);
        }

        let mut dropped = 0_usize;
        for (page, targets) in &outbound {
            let Some(&from) = node_map.get(page) else {
                continue;
            };
            for target in targets {
                match node_map.get(target) {
                    Some(&to) => {
                        graph.add_edge(from, to, ());
                    }
                    None => dropped += 1,
                }
            }
        }

        debug!(
            pages = graph.node_count(),
            links = graph.edge_count(),
            dropped,
            "built corpus graph"
        );

        Self { graph, node_map }
    }

    /// Number of pages (`N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the corpus has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Total number of links in the corpus.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All pages in ascending name order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.node_map.keys().map(String::as_str)
    }

    /// Whether `page` is a key of the corpus.
    #[must_use]
    pub fn contains(&self, page: &str) -> bool {
        self.node_map.contains_key(page)
    }

    /// The set of pages `page` links to.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the corpus.
    pub fn links(&self, page: &str) -> Result<BTreeSet<&str>, RankError> {
        let idx = self.require(page)?;
        Ok(self.neighbor_names(idx, Direction::Outgoing))
    }

    /// Number of distinct pages `page` links to.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the corpus.
    pub fn out_degree(&self, page: &str) -> Result<usize, RankError> {
        let idx = self.require(page)?;
        Ok(self.out_degree_at(idx.index()))
    }

    /// Whether `page` has no outbound links.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the corpus.
    pub fn is_sink(&self, page: &str) -> Result<bool, RankError> {
        Ok(self.out_degree(page)? == 0)
    }

    /// Pages with no outbound links, in ascending name order.
    pub fn sinks(&self) -> impl Iterator<Item = &str> + '_ {
        self.node_map
            .iter()
            .filter(|&(_, &idx)| self.out_degree_at(idx.index()) == 0)
            .map(|(page, _)| page.as_str())
    }

    /// The set of pages whose outbound links include `page`.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::UnknownPage`] if `page` is not in the corpus.
    pub fn linking_to(&self, page: &str) -> Result<BTreeSet<&str>, RankError> {
        let idx = self.require(page)?;
        Ok(self.neighbor_names(idx, Direction::Incoming))
    }

    // -----------------------------------------------------------------------
    // Index-based access for the estimators
    // -----------------------------------------------------------------------

    /// Dense index of `page` (its position in ascending name order).
    pub(crate) fn index_of(&self, page: &str) -> Option<usize> {
        self.node_map.get(page).map(|idx| idx.index())
    }

    /// Page name at dense index `idx`.
    pub(crate) fn page_at(&self, idx: usize) -> &str {
        &self.graph[NodeIndex::new(idx)]
    }

    pub(crate) fn out_degree_at(&self, idx: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .count()
    }

    /// Dense indices of the pages `idx` links to.
    pub(crate) fn successors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(|n| n.index())
    }

    /// Dense indices of the pages linking to `idx`.
    pub(crate) fn predecessors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .map(|n| n.index())
    }

    fn require(&self, page: &str) -> Result<NodeIndex, RankError> {
        self.node_map
            .get(page)
            .copied()
            .ok_or_else(|| RankError::UnknownPage(page.to_string()))
    }

    fn neighbor_names(&self, idx: NodeIndex, dir: Direction) -> BTreeSet<&str> {
        self.graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].as_str())
            .collect()
    }
}

impl<P, L, T> FromIterator<(P, L)> for CorpusGraph
where
    P: Into<Page>,
    L: IntoIterator<Item = T>,
    T: Into<Page>,
{
    fn from_iter<I: IntoIterator<Item = (P, L)>>(iter: I) -> Self {
        Self::from_links(iter)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(links: &[(&str, &[&str])]) -> CorpusGraph {
        CorpusGraph::from_links(links.iter().map(|(p, ls)| (*p, ls.iter().copied())))
    }

    #[test]
    fn empty_corpus() {
        let c = corpus(&[]);
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert_eq!(c.link_count(), 0);
        assert_eq!(c.pages().count(), 0);
    }

    #[test]
    fn self_links_are_dropped() {
        let c = corpus(&[("a", &["a", "b"]), ("b", &[])]);
        assert_eq!(c.links("a").expect("a exists"), BTreeSet::from(["b"]));
        assert_eq!(c.link_count(), 1);
    }

    #[test]
    fn single_self_linking_page_is_a_sink() {
        let c = corpus(&[("only", &["only"])]);
        assert_eq!(c.len(), 1);
        assert!(c.is_sink("only").expect("only exists"));
    }

    #[test]
    fn dangling_targets_are_filtered() {
        let c = corpus(&[("a", &["b", "outside"]), ("b", &["nowhere"])]);
        assert_eq!(c.len(), 2);
        assert!(!c.contains("outside"));
        assert_eq!(c.links("a").expect("a exists"), BTreeSet::from(["b"]));
        assert!(c.is_sink("b").expect("b exists"));
    }

    #[test]
    fn duplicate_links_collapse() {
        let c = corpus(&[("a", &["b", "b", "b"]), ("b", &["a"])]);
        assert_eq!(c.out_degree("a").expect("a exists"), 1);
        assert_eq!(c.link_count(), 2);
    }

    #[test]
    fn repeated_page_entries_merge() {
        let c = CorpusGraph::from_links(vec![
            ("a", vec!["b"]),
            ("b", vec![]),
            ("c", vec![]),
            ("a", vec!["c"]),
        ]);
        assert_eq!(c.links("a").expect("a exists"), BTreeSet::from(["b", "c"]));
    }

    #[test]
    fn pages_are_sorted_by_name() {
        let c = corpus(&[("zeta", &[]), ("alpha", &[]), ("mu", &[])]);
        let pages: Vec<&str> = c.pages().collect();
        assert_eq!(pages, vec!["alpha", "mu", "zeta"]);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(c.index_of(page), Some(i));
            assert_eq!(c.page_at(i), *page);
        }
    }

    #[test]
    fn linking_to_returns_reverse_links() {
        let c = corpus(&[("a", &["c"]), ("b", &["c", "a"]), ("c", &[])]);
        assert_eq!(
            c.linking_to("c").expect("c exists"),
            BTreeSet::from(["a", "b"])
        );
        assert_eq!(c.linking_to("a").expect("a exists"), BTreeSet::from(["b"]));
        assert!(c.linking_to("b").expect("b exists").is_empty());
    }

    #[test]
    fn sinks_lists_pages_without_links() {
        let c = corpus(&[("a", &["b"]), ("b", &[]), ("c", &[])]);
        let sinks: Vec<&str> = c.sinks().collect();
        assert_eq!(sinks, vec!["b", "c"]);
    }

    #[test]
    fn unknown_page_is_an_error() {
        let c = corpus(&[("a", &[])]);
        assert_eq!(
            c.links("nope"),
            Err(RankError::UnknownPage("nope".to_string()))
        );
        assert!(c.linking_to("nope").is_err());
        assert!(c.out_degree("nope").is_err());
    }

    #[test]
    fn index_neighbors_match_named_lookups() {
        let c = corpus(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])]);
        let a = c.index_of("a").expect("a exists");
        let mut succ: Vec<&str> = c.successors(a).map(|i| c.page_at(i)).collect();
        succ.sort_unstable();
        assert_eq!(succ, vec!["b", "c"]);

        let cidx = c.index_of("c").expect("c exists");
        let mut pred: Vec<&str> = c.predecessors(cidx).map(|i| c.page_at(i)).collect();
        pred.sort_unstable();
        assert_eq!(pred, vec!["a", "b"]);
        assert_eq!(c.out_degree_at(cidx), 1);
    }

    #[test]
    fn collect_from_iterator() {
        let c: CorpusGraph = vec![("x", vec!["y"]), ("y", vec!["x"])]
            .into_iter()
            .collect();
        assert_eq!(c.len(), 2);
        assert_eq!(c.link_count(), 2);
    }
}
