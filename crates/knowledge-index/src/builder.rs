//! TF-IDF index construction.
//!
//! idf(term) = ln(total_documents / document_frequency(term)), floored at
//! MIN_IDF so terms present in every document keep a positive weight.

use std::collections::HashMap;
use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use crate::index::{IndexedDocument, KnowledgeIndex};
use crate::loader::Document;
use crate::tokenizer::term_counts;

/// Floor applied to idf values. A term appearing in every document would
/// otherwise get ln(1) = 0 and vanish from every vector.
pub const MIN_IDF: f64 = 0.01;

/// Build an index from loaded documents.
///
/// Deterministic for a fixed document sequence. An empty corpus yields an
/// empty index, not an error.
pub fn build_index(documents: Vec<Document>) -> KnowledgeIndex {
    if documents.is_empty() {
        return KnowledgeIndex::empty();
    }

    let started = Instant::now();
    let total = documents.len();

    let frequencies: Vec<(String, HashMap<String, usize>)> = documents
        .into_iter()
        .map(|doc| (doc.identifier, term_counts(&doc.raw_text)))
        .collect();

    let mut document_frequency: HashMap<String, usize> = HashMap::new();
    for (_, counts) in &frequencies {
        for term in counts.keys() {
            *document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    let idf: HashMap<String, f64> = document_frequency
        .into_iter()
        .map(|(term, df)| {
            let weight = (total as f64 / df as f64).ln().max(MIN_IDF);
            (term, weight)
        })
        .collect();

    let indexed: Vec<IndexedDocument> = frequencies
        .into_iter()
        .map(|(identifier, term_frequencies)| {
            let magnitude = term_frequencies
                .iter()
                .map(|(term, count)| {
                    let weight = *count as f64 * idf[term];
                    weight * weight
                })
                .sum::<f64>()
                .sqrt();
            IndexedDocument {
                identifier,
                term_frequencies,
                magnitude,
            }
        })
        .collect();

    debug!(
        documents = total,
        terms = idf.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Built TF-IDF index"
    );

    KnowledgeIndex {
        documents: indexed,
        idf,
        total_documents: total,
        built_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(identifier: &str, text: &str) -> Document {
        Document {
            identifier: identifier.to_string(),
            raw_text: text.to_string(),
        }
    }

    fn sample_corpus() -> Vec<Document> {
        vec![
            doc("data/postgres", "database indexing patterns"),
            doc("stacks/react", "react performance tips"),
        ]
    }

    #[test]
    fn test_empty_corpus() {
        let index = build_index(vec![]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_idf_positive_and_finite() {
        let index = build_index(sample_corpus());
        assert!(!index.idf.is_empty());
        for (term, idf) in &index.idf {
            assert!(*idf > 0.0, "idf for {term} must be positive");
            assert!(idf.is_finite(), "idf for {term} must be finite");
        }
    }

    #[test]
    fn test_idf_floor_for_ubiquitous_terms() {
        let index = build_index(vec![
            doc("one", "shared unique1"),
            doc("two", "shared unique2"),
        ]);
        // "shared" appears in every document: ln(2/2) = 0, floored
        assert_eq!(index.idf["shared"], MIN_IDF);
        // rare terms keep the full ln(2/1) weight
        assert!((index.idf["unique1"] - 2.0f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_magnitudes_nonnegative() {
        let index = build_index(sample_corpus());
        for doc in &index.documents {
            assert!(doc.magnitude > 0.0);
        }
    }

    #[test]
    fn test_zero_magnitude_only_for_empty_documents() {
        let index = build_index(vec![doc("empty", "! ?"), doc("full", "actual words here")]);
        let empty = index
            .documents
            .iter()
            .find(|d| d.identifier == "empty")
            .unwrap();
        assert_eq!(empty.magnitude, 0.0);
        assert!(empty.term_frequencies.is_empty());
    }

    #[test]
    fn test_magnitude_matches_definition() {
        let index = build_index(vec![doc("solo", "rust rust memory")]);
        let solo = &index.documents[0];
        // Single-document corpus: every idf is floored at MIN_IDF
        let expected = ((2.0 * MIN_IDF).powi(2) + (1.0 * MIN_IDF).powi(2)).sqrt();
        assert!((solo.magnitude - expected).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let a = build_index(sample_corpus());
        let b = build_index(sample_corpus());
        assert_eq!(a.idf.len(), b.idf.len());
        for (term, idf) in &a.idf {
            assert_eq!(b.idf[term], *idf);
        }
        let mags_a: Vec<f64> = a.documents.iter().map(|d| d.magnitude).collect();
        let mags_b: Vec<f64> = b.documents.iter().map(|d| d.magnitude).collect();
        assert_eq!(mags_a, mags_b);
    }

    #[test]
    fn test_total_documents() {
        let index = build_index(sample_corpus());
        assert_eq!(index.total_documents, 2);
        assert_eq!(index.documents.len(), 2);
    }
}
