//! # knowledge-search
//!
//! Query engine for the knowledge base.
//!
//! Ranks indexed documents by cosine similarity between the query's
//! tf-idf vector and each document vector, with category filtering and
//! score thresholds. When the statistical model yields nothing, the
//! fuzzy matcher provides a heuristic fallback over resource metadata.

pub mod engine;
pub mod fuzzy;

pub use engine::{search_index, SearchEngine, SearchOptions};
pub use fuzzy::{fuzzy_match, FuzzyMatch};
