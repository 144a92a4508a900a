//! Response payload types for the service operations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use knowledge_types::ResourceMetadata;

/// Which search mode produced the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// TF-IDF cosine similarity over the built index
    Statistical,
    /// Substring heuristic over resource metadata
    Fuzzy,
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub resource: ResourceMetadata,
    /// Match score (0.0-1.0); cosine or heuristic depending on the mode
    pub score: f64,
    /// Score as an integer percentage
    pub relevance: u8,
    /// Query terms found in the document (statistical mode only)
    pub matched_terms: Vec<String>,
    /// Full document content when the request asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Response for `search_knowledge`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchKnowledgeResponse {
    pub mode: SearchMode,
    pub results: Vec<SearchHit>,
}

/// Response for `get_knowledge`.
#[derive(Debug, Clone, Serialize)]
pub struct GetKnowledgeResponse {
    pub uri: String,
    pub content: String,
}

/// Response for `get_knowledge_status`.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeStatusResponse {
    pub is_indexing: bool,
    /// 0 until the index is ready, then 100
    pub progress: u8,
    pub is_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_documents: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_terms: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}
