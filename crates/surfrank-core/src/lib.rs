#![forbid(unsafe_code)]
//! surfrank-core library.
//!
//! Ranks the pages of a small, closed hyperlink corpus two ways:
//!
//! - [`sample_pagerank`]: a random surfer walks the [`transition_model`] and
//!   visit frequencies are tallied.
//! - [`iterate_pagerank`]: the PageRank equations are relaxed to a fixed point.
//!
//! # Conventions
//!
//! - **Errors**: estimators return [`RankError`]; config loading uses
//!   `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod choice;
pub mod config;
pub mod corpus;
pub mod error;
pub mod iterate;
pub mod rank;
pub mod sampling;
pub mod transition;

pub use choice::weighted_choice;
pub use config::RankConfig;
pub use corpus::{CorpusGraph, Page};
pub use error::{ErrorKind, RankError};
pub use iterate::{IterationReport, iterate_pagerank};
pub use rank::RankMapping;
pub use sampling::{sample_pagerank, sample_pagerank_with};
pub use transition::{TransitionDistribution, transition_model};
