//! Validated request types for the service operations.
//!
//! Boundary arguments arrive loosely typed from the invocation layer;
//! each operation gets an explicit struct with defaults, validated before
//! anything reaches the query engine.

use serde::Deserialize;

use knowledge_search::SearchOptions;
use knowledge_types::SearchSettings;

use crate::error::ServiceError;

/// Arguments for `search_knowledge`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchKnowledgeRequest {
    /// Free-text query (required, non-empty)
    pub query: String,

    /// Result cap; defaults from settings, bounded by `max_limit`
    #[serde(default)]
    pub limit: Option<usize>,

    /// Restrict results to these categories
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Attach full document content to each result
    #[serde(default = "default_include_content")]
    pub include_content: bool,
}

fn default_include_content() -> bool {
    true
}

impl SearchKnowledgeRequest {
    /// Minimal request with defaults for everything but the query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            categories: None,
            include_content: default_include_content(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn without_content(mut self) -> Self {
        self.include_content = false;
        self
    }

    /// Validate against the configured search settings and produce the
    /// engine options.
    pub fn validate(&self, settings: &SearchSettings) -> Result<SearchOptions, ServiceError> {
        if self.query.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let limit = self.limit.unwrap_or(settings.default_limit);
        if limit == 0 || limit > settings.max_limit {
            return Err(ServiceError::InvalidInput(format!(
                "limit must be between 1 and {}, got {limit}",
                settings.max_limit
            )));
        }

        let categories = self.categories.clone().filter(|c| !c.is_empty());

        let mut options = SearchOptions::new()
            .with_limit(limit)
            .with_min_score(settings.min_score);
        if let Some(categories) = categories {
            options = options.with_categories(categories);
        }
        Ok(options)
    }
}
