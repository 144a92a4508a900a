//! The knowledge service: the three externally exposed operations.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use knowledge_index::{
    category_of, get_content, list_resources, IndexError, IndexService, IndexStatus,
};
use knowledge_search::{fuzzy_match, SearchEngine};
use knowledge_types::{KnowledgeConfig, ResourceMetadata};

use crate::error::ServiceError;
use crate::requests::SearchKnowledgeRequest;
use crate::responses::{
    GetKnowledgeResponse, KnowledgeStatusResponse, SearchHit, SearchKnowledgeResponse, SearchMode,
};

/// Uri scheme for knowledge resources.
pub const URI_SCHEME: &str = "knowledge://";

/// Facade over the index lifecycle, query engine, and resource accessor.
/// Constructed once at process startup and shared via `Arc`.
pub struct KnowledgeService {
    config: KnowledgeConfig,
    index: Arc<IndexService>,
    engine: SearchEngine,
}

impl KnowledgeService {
    pub fn new(config: KnowledgeConfig) -> Self {
        let index = Arc::new(IndexService::new(config.clone()));
        let engine = SearchEngine::new(index.clone());
        Self {
            config,
            index,
            engine,
        }
    }

    /// The underlying lifecycle service, for status checks and warm-up.
    pub fn index_service(&self) -> &Arc<IndexService> {
        &self.index
    }

    /// Kick off the index build without blocking.
    pub fn warm_up(&self) {
        self.index.trigger_background();
    }

    /// Ranked free-text search with fuzzy fallback.
    ///
    /// Statistical results win when present; otherwise the fuzzy matcher
    /// runs over the (category-filtered) resource listing, and the
    /// response labels which mode produced the output.
    pub async fn search_knowledge(
        &self,
        request: SearchKnowledgeRequest,
    ) -> Result<SearchKnowledgeResponse, ServiceError> {
        let options = request.validate(&self.config.search)?;
        debug!(query = %request.query, limit = options.limit, "search_knowledge");

        let results = self.engine.search(&request.query, &options).await?;
        let resources = list_resources(&self.config.knowledge_dir, &self.config.extensions)?;

        if !results.is_empty() {
            let by_id: HashMap<&str, &ResourceMetadata> = resources
                .iter()
                .map(|r| (r.identifier.as_str(), r))
                .collect();

            let hits = results
                .into_iter()
                .map(|result| {
                    let resource = by_id
                        .get(result.identifier.as_str())
                        .map(|r| (*r).clone())
                        .unwrap_or_else(|| placeholder_metadata(&result.identifier));
                    SearchHit {
                        content: self.content_for(&result.identifier, request.include_content),
                        resource,
                        score: result.score,
                        relevance: result.relevance,
                        matched_terms: result.matched_terms,
                    }
                })
                .collect();

            return Ok(SearchKnowledgeResponse {
                mode: SearchMode::Statistical,
                results: hits,
            });
        }

        // Statistical search found nothing: heuristic fallback
        let candidates: Vec<ResourceMetadata> = match &options.categories {
            Some(categories) => resources
                .into_iter()
                .filter(|r| categories.iter().any(|c| c == &r.category))
                .collect(),
            None => resources,
        };

        let hits: Vec<SearchHit> = fuzzy_match(&candidates, &request.query)
            .into_iter()
            .take(options.limit)
            .map(|m| SearchHit {
                content: self.content_for(&m.resource.identifier, request.include_content),
                score: m.score,
                relevance: (m.score * 100.0).round() as u8,
                matched_terms: Vec::new(),
                resource: m.resource,
            })
            .collect();

        info!(
            query = %request.query,
            results = hits.len(),
            "Statistical search empty, served fuzzy fallback"
        );

        Ok(SearchKnowledgeResponse {
            mode: SearchMode::Fuzzy,
            results: hits,
        })
    }

    /// Fetch content by `knowledge://<category>/<name>` uri.
    pub async fn get_knowledge(&self, uri: &str) -> Result<GetKnowledgeResponse, ServiceError> {
        let identifier = parse_uri(uri)?;
        match get_content(&self.config.knowledge_dir, &identifier, &self.config.extensions) {
            Ok(content) => Ok(GetKnowledgeResponse {
                uri: uri.to_string(),
                content,
            }),
            Err(IndexError::ResourceNotFound { valid, .. }) => {
                Err(ServiceError::ResourceNotFound {
                    uri: uri.to_string(),
                    valid_uris: valid
                        .into_iter()
                        .map(|id| format!("{URI_SCHEME}{id}"))
                        .collect(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Non-blocking index status snapshot.
    pub fn get_knowledge_status(&self) -> KnowledgeStatusResponse {
        match self.index.status() {
            IndexStatus::Idle => KnowledgeStatusResponse {
                is_indexing: false,
                progress: 0,
                is_ready: false,
                error: None,
                total_documents: None,
                unique_terms: None,
                built_at: None,
            },
            IndexStatus::Building => KnowledgeStatusResponse {
                is_indexing: true,
                progress: 0,
                is_ready: false,
                error: None,
                total_documents: None,
                unique_terms: None,
                built_at: None,
            },
            IndexStatus::Ready => {
                let index = self.index.cached();
                KnowledgeStatusResponse {
                    is_indexing: false,
                    progress: 100,
                    is_ready: true,
                    error: None,
                    total_documents: index.as_ref().map(|i| i.total_documents),
                    unique_terms: index.as_ref().map(|i| i.unique_terms()),
                    built_at: index.as_ref().map(|i| i.built_at),
                }
            }
            IndexStatus::Failed(reason) => KnowledgeStatusResponse {
                is_indexing: false,
                progress: 0,
                is_ready: false,
                error: Some(reason),
                total_documents: None,
                unique_terms: None,
                built_at: None,
            },
        }
    }

    fn content_for(&self, identifier: &str, include: bool) -> Option<String> {
        if !include {
            return None;
        }
        match get_content(&self.config.knowledge_dir, identifier, &self.config.extensions) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(identifier, error = %e, "Could not attach content to result");
                None
            }
        }
    }
}

/// Parse a `knowledge://` uri into a document identifier.
fn parse_uri(uri: &str) -> Result<String, ServiceError> {
    let rest = uri
        .strip_prefix(URI_SCHEME)
        .ok_or_else(|| ServiceError::InvalidUri(uri.to_string()))?;
    if rest.is_empty() || rest.split('/').any(|segment| segment.is_empty()) {
        return Err(ServiceError::InvalidUri(uri.to_string()));
    }
    Ok(rest.to_string())
}

/// Metadata for an identifier missing from the listing (e.g. the file was
/// removed between indexing and the query).
fn placeholder_metadata(identifier: &str) -> ResourceMetadata {
    ResourceMetadata {
        identifier: identifier.to_string(),
        name: identifier
            .rsplit('/')
            .next()
            .unwrap_or(identifier)
            .to_string(),
        description: String::new(),
        category: category_of(identifier).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uri() {
        assert_eq!(parse_uri("knowledge://data/postgres").unwrap(), "data/postgres");
        assert_eq!(parse_uri("knowledge://readme").unwrap(), "readme");
    }

    #[test]
    fn test_parse_uri_rejects_bad_shapes() {
        assert!(parse_uri("http://data/postgres").is_err());
        assert!(parse_uri("knowledge://").is_err());
        assert!(parse_uri("knowledge://data//postgres").is_err());
        assert!(parse_uri("data/postgres").is_err());
    }

    #[test]
    fn test_placeholder_metadata() {
        let meta = placeholder_metadata("data/gone");
        assert_eq!(meta.name, "gone");
        assert_eq!(meta.category, "data");
    }
}
