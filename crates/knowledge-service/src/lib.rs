//! # knowledge-service
//!
//! Operation surface for the knowledge base.
//!
//! Provides the three operations exposed to the surrounding invocation
//! layer (the transport envelope is owned externally):
//! - `search_knowledge`: ranked search with fuzzy fallback
//! - `get_knowledge`: direct content lookup by `knowledge://` uri
//! - `get_knowledge_status`: non-blocking index status snapshot

pub mod error;
pub mod logging;
pub mod requests;
pub mod responses;
pub mod service;

pub use error::ServiceError;
pub use logging::init_logging;
pub use requests::SearchKnowledgeRequest;
pub use responses::{
    GetKnowledgeResponse, KnowledgeStatusResponse, SearchHit, SearchKnowledgeResponse, SearchMode,
};
pub use service::KnowledgeService;
