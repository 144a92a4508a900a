//! In-memory TF-IDF index types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A document as stored in the index: raw term frequencies plus the
/// precomputed Euclidean norm of its tf-idf vector.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub identifier: String,
    /// term -> raw occurrence count
    pub term_frequencies: HashMap<String, usize>,
    /// sqrt(sum((tf * idf)^2)); zero only for documents with no terms
    pub magnitude: f64,
}

/// The built index. Never mutated after construction; a rebuild replaces
/// it wholesale.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    /// Documents in load order (identifier-sorted); ranking tie-breaks
    /// rely on this order being stable.
    pub documents: Vec<IndexedDocument>,
    /// term -> inverse document frequency, always positive and finite
    pub idf: HashMap<String, f64>,
    pub total_documents: usize,
    pub built_at: DateTime<Utc>,
}

impl KnowledgeIndex {
    /// An index over zero documents: built, but answers nothing.
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            idf: HashMap::new(),
            total_documents: 0,
            built_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of distinct terms across the corpus.
    pub fn unique_terms(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = KnowledgeIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.total_documents, 0);
        assert_eq!(index.unique_terms(), 0);
    }
}
