//! YAML front-matter parsing for knowledge documents.
//!
//! Front matter feeds listings and the fuzzy fallback matcher; the
//! statistical index works on raw text and never depends on it.
//! Malformed front matter degrades to empty metadata, never an error.

use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Deserialize;

use knowledge_types::ResourceMetadata;

use crate::loader::category_of;

/// Maximum length of a description derived from the document body.
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Metadata block parsed from the top of a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Split a document into front matter and body.
///
/// Absent or malformed front matter yields `FrontMatter::default()` and
/// the remaining text as body.
pub fn parse_front_matter(text: &str) -> (FrontMatter, String) {
    let matter = Matter::<YAML>::new();
    match matter.parse::<FrontMatter>(text) {
        Ok(parsed) => (parsed.data.unwrap_or_default(), parsed.content),
        Err(_) => (FrontMatter::default(), text.to_string()),
    }
}

/// Derive the listing metadata for a document.
///
/// Fallbacks when front matter is missing a field: name from the file
/// stem, category from the identifier's first segment, description from
/// the first non-empty body line.
pub fn resource_metadata(identifier: &str, text: &str) -> ResourceMetadata {
    let (front, body) = parse_front_matter(text);

    let name = front
        .name
        .or(front.title)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| file_stem(identifier).to_string());

    let category = front
        .category
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| category_of(identifier).to_string());

    let description = front
        .description
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| first_line_summary(&body));

    ResourceMetadata {
        identifier: identifier.to_string(),
        name,
        description,
        category,
    }
}

/// The final path segment of an identifier.
fn file_stem(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}

/// First non-empty body line, heading markers stripped, truncated.
fn first_line_summary(body: &str) -> String {
    let line = body
        .lines()
        .map(|l| l.trim_start_matches('#').trim())
        .find(|l| !l.is_empty())
        .unwrap_or("");
    line.chars().take(MAX_DESCRIPTION_CHARS).collect()
}
