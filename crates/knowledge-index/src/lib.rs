//! # knowledge-index
//!
//! TF-IDF indexing for the knowledge base.
//!
//! This crate loads a directory of knowledge documents, tokenizes them,
//! and builds an in-memory TF-IDF index with precomputed document
//! magnitudes for cosine-similarity scoring.
//!
//! ## Features
//! - Recursive document loading with stable path-derived identifiers
//! - YAML front-matter parsing for resource metadata
//! - Deterministic TF-IDF build with an IDF floor for ubiquitous terms
//! - Single-flight async lifecycle: concurrent callers share one build

pub mod builder;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod loader;
pub mod resources;
pub mod service;
pub mod tokenizer;

pub use builder::{build_index, MIN_IDF};
pub use error::IndexError;
pub use frontmatter::{parse_front_matter, resource_metadata, FrontMatter};
pub use index::{IndexedDocument, KnowledgeIndex};
pub use loader::{category_of, load_documents, Document, DEFAULT_CATEGORY};
pub use resources::{get_content, list_resources};
pub use service::{IndexService, IndexStatus};
pub use tokenizer::{term_counts, tokenize, MIN_TERM_LEN};
