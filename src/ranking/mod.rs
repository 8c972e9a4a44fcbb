//! Related-listing ranking
//!
//! `score` compares two listings attribute by attribute and yields a
//! percentage; `rank` picks the best matches out of a catalog.

mod scoring;
mod selection;

pub use scoring::{score, Weights, WEIGHTS};
pub use selection::{rank, rank_scored, ScoredCandidate, HIGH_SIMILARITY};
