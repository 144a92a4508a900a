//! Heuristic fallback matcher over resource metadata.
//!
//! Used when the statistical engine returns nothing. Substring matching
//! against name/description/category/identifier with field bonuses; an
//! approximation, not a statistical model.

use std::cmp::Ordering;

use knowledge_types::ResourceMetadata;

/// Bonus applied per query token matched in the resource name.
const NAME_BONUS: f64 = 0.5;
/// Bonus per token matched in the description.
const DESCRIPTION_BONUS: f64 = 0.3;
/// Bonus per token matched in the category.
const CATEGORY_BONUS: f64 = 0.2;

/// A resource with its heuristic match score.
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub resource: ResourceMetadata,
    /// Heuristic score, capped at 1.0
    pub score: f64,
}

/// Score resources against a query by substring matching.
///
/// Base score is the fraction of query tokens found anywhere in the
/// resource's combined fields; field bonuses stack on top, capped at 1.0.
/// Zero-scoring resources are excluded; ties keep input order.
pub fn fuzzy_match(resources: &[ResourceMetadata], query: &str) -> Vec<FuzzyMatch> {
    let tokens: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<FuzzyMatch> = Vec::new();
    for resource in resources {
        let name = resource.name.to_lowercase();
        let description = resource.description.to_lowercase();
        let category = resource.category.to_lowercase();
        let identifier = resource.identifier.to_lowercase();
        let haystack = format!("{name} {description} {category} {identifier}");

        let mut matched = 0usize;
        let mut bonus = 0.0;
        for token in &tokens {
            if haystack.contains(token.as_str()) {
                matched += 1;
            }
            if name.contains(token.as_str()) {
                bonus += NAME_BONUS;
            }
            if description.contains(token.as_str()) {
                bonus += DESCRIPTION_BONUS;
            }
            if category.contains(token.as_str()) {
                bonus += CATEGORY_BONUS;
            }
        }

        let score = (matched as f64 / tokens.len() as f64 + bonus).min(1.0);
        if score > 0.0 {
            matches.push(FuzzyMatch {
                resource: resource.clone(),
                score,
            });
        }
    }

    // Stable sort keeps input order for equal scores
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}
