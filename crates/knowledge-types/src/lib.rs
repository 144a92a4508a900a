//! # knowledge-types
//!
//! Shared domain types for the knowledge-base search system.
//!
//! This crate defines the structures used throughout the workspace:
//! - Resources: metadata describing a knowledge document
//! - Search results: scored matches returned to callers
//! - Settings: layered configuration (defaults -> file -> env)
//! - Errors: the unified cross-crate error type

pub mod config;
pub mod error;
pub mod resource;

pub use config::{KnowledgeConfig, SearchSettings, DEFAULT_EXTENSIONS};
pub use error::KnowledgeError;
pub use resource::{ResourceMetadata, SearchResult};
