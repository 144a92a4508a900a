//! Resource metadata and search result types.

use serde::{Deserialize, Serialize};

/// Metadata describing a knowledge document, derived from its front matter
/// and its location under the knowledge root. Recomputed on every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Stable identifier derived from the relative path (extension stripped).
    pub identifier: String,
    /// Human-readable name (front matter `name`/`title`, or the file stem).
    pub name: String,
    /// Short description (front matter, or the first body line).
    pub description: String,
    /// Category (front matter, or the first path segment).
    pub category: String,
}

impl ResourceMetadata {
    /// The `knowledge://` uri for this resource.
    pub fn uri(&self) -> String {
        format!("knowledge://{}", self.identifier)
    }
}

/// A single scored match from the query engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document identifier.
    pub identifier: String,
    /// Cosine similarity score (0.0-1.0).
    pub score: f64,
    /// Query terms that appear in the document.
    pub matched_terms: Vec<String>,
    /// Score expressed as an integer percentage.
    pub relevance: u8,
}

impl SearchResult {
    /// Create a result, deriving the relevance percentage from the score.
    pub fn new(identifier: impl Into<String>, score: f64, matched_terms: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            score,
            matched_terms,
            relevance: (score * 100.0).round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri() {
        let meta = ResourceMetadata {
            identifier: "data/postgres".to_string(),
            name: "Postgres".to_string(),
            description: "Postgres patterns".to_string(),
            category: "data".to_string(),
        };
        assert_eq!(meta.uri(), "knowledge://data/postgres");
    }

    #[test]
    fn test_relevance_rounding() {
        let result = SearchResult::new("doc", 0.678, vec![]);
        assert_eq!(result.relevance, 68);

        let result = SearchResult::new("doc", 0.0, vec![]);
        assert_eq!(result.relevance, 0);

        let result = SearchResult::new("doc", 1.0, vec![]);
        assert_eq!(result.relevance, 100);
    }
}
