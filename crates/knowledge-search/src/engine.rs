//! Cosine-similarity query engine.
//!
//! The scoring core is a pure function over a built index; `SearchEngine`
//! wraps it behind the lifecycle service so callers get lazy indexing.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use knowledge_index::{category_of, term_counts, IndexError, IndexService, KnowledgeIndex};
use knowledge_types::SearchResult;

/// Options controlling filtering and truncation.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum results to return
    pub limit: usize,
    /// Results scoring below this are dropped
    pub min_score: f64,
    /// Restrict results to these categories (None = all)
    pub categories: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            min_score: 0.01,
            categories: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }
}

/// Query engine bound to an index lifecycle service.
pub struct SearchEngine {
    service: Arc<IndexService>,
}

impl SearchEngine {
    pub fn new(service: Arc<IndexService>) -> Self {
        Self { service }
    }

    /// Search the knowledge base, building the index on first use.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, IndexError> {
        let index = self.service.ensure_index().await?;
        let results = search_index(&index, query, options);
        debug!(
            query = query,
            results = results.len(),
            "Statistical search complete"
        );
        Ok(results)
    }
}

/// Score every document in `index` against `query`. Pure and idempotent.
///
/// Query term weight = occurrence count x idf; terms unseen at build time
/// contribute nothing. Cosine similarity is 0 when either vector has zero
/// magnitude. Results are sorted descending by score, ties keeping the
/// index's document order, then truncated to `options.limit`.
pub fn search_index(
    index: &KnowledgeIndex,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult> {
    if index.is_empty() {
        return Vec::new();
    }

    // (query weight, idf) per known query term
    let weights: HashMap<&str, (f64, f64)> = term_counts(query)
        .into_iter()
        .filter_map(|(term, count)| {
            index
                .idf
                .get_key_value(&term)
                .map(|(key, idf)| (key.as_str(), (count as f64 * idf, *idf)))
        })
        .collect();

    let query_magnitude = weights
        .values()
        .map(|(weight, _)| weight * weight)
        .sum::<f64>()
        .sqrt();
    if query_magnitude == 0.0 {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = Vec::new();
    for doc in &index.documents {
        if let Some(categories) = &options.categories {
            let category = category_of(&doc.identifier);
            if !categories.iter().any(|c| c == category) {
                continue;
            }
        }
        if doc.magnitude == 0.0 {
            continue;
        }

        let mut dot = 0.0;
        let mut matched_terms = Vec::new();
        for (term, (query_weight, idf)) in &weights {
            if let Some(count) = doc.term_frequencies.get(*term) {
                dot += query_weight * (*count as f64 * idf);
                matched_terms.push((*term).to_string());
            }
        }
        if dot == 0.0 {
            continue;
        }

        let score = (dot / (query_magnitude * doc.magnitude)).clamp(0.0, 1.0);
        if score < options.min_score {
            continue;
        }
        matched_terms.sort();
        results.push(SearchResult::new(doc.identifier.clone(), score, matched_terms));
    }

    // Stable sort: equal scores keep original document order
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(options.limit);
    results
}
