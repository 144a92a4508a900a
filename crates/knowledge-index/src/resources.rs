//! Direct resource access: content lookup and metadata listing.
//!
//! Both operations re-walk the knowledge directory on every call so they
//! reflect the current file set without waiting on an index build.

use std::fs;
use std::path::{Component, Path};

use tracing::warn;

use knowledge_types::ResourceMetadata;

use crate::error::IndexError;
use crate::frontmatter::resource_metadata;
use crate::loader::load_documents;

/// List metadata for every document under `root`. Uncached.
pub fn list_resources(root: &Path, extensions: &[String]) -> Result<Vec<ResourceMetadata>, IndexError> {
    let documents = load_documents(root, extensions)?;
    Ok(documents
        .iter()
        .map(|doc| resource_metadata(&doc.identifier, &doc.raw_text))
        .collect())
}

/// Read the full content of the document with the given identifier.
///
/// On an unknown identifier the error carries the identifiers that do
/// exist so callers can report suggestions.
pub fn get_content(root: &Path, identifier: &str, extensions: &[String]) -> Result<String, IndexError> {
    if is_safe_identifier(identifier) {
        for extension in extensions {
            let candidate = root.join(identifier).with_extension(extension);
            if !candidate.is_file() {
                continue;
            }
            match fs::read_to_string(&candidate) {
                Ok(content) => return Ok(content),
                Err(e) => {
                    warn!(path = ?candidate, error = %e, "Failed to read resource");
                }
            }
        }
    }

    let valid = load_documents(root, extensions)?
        .into_iter()
        .map(|doc| doc.identifier)
        .collect();
    Err(IndexError::ResourceNotFound {
        identifier: identifier.to_string(),
        valid,
    })
}

/// Reject identifiers that would escape the knowledge root.
fn is_safe_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && Path::new(identifier)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge_types::DEFAULT_EXTENSIONS;
    use std::fs;
    use tempfile::TempDir;

    fn extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    fn corpus() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("postgres.md"),
            "---\nname: Postgres\ndescription: Indexing patterns\n---\nBody text\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "top-level notes").unwrap();
        temp_dir
    }

    #[test]
    fn test_get_content() {
        let temp_dir = corpus();
        let content = get_content(temp_dir.path(), "data/postgres", &extensions()).unwrap();
        assert!(content.contains("Body text"));
    }

    #[test]
    fn test_get_content_not_found_lists_valid() {
        let temp_dir = corpus();
        let err = get_content(temp_dir.path(), "missing/thing", &extensions()).unwrap_err();
        match err {
            IndexError::ResourceNotFound { identifier, valid } => {
                assert_eq!(identifier, "missing/thing");
                assert!(valid.contains(&"data/postgres".to_string()));
                assert!(valid.contains(&"readme".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_get_content_rejects_traversal() {
        let temp_dir = corpus();
        let err = get_content(temp_dir.path(), "../etc/passwd", &extensions()).unwrap_err();
        assert!(matches!(err, IndexError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_get_content_respects_configured_extensions() {
        let temp_dir = corpus();
        let adoc_only = vec!["adoc".to_string()];

        // postgres.md exists, but .md is not a configured extension
        let err = get_content(temp_dir.path(), "data/postgres", &adoc_only).unwrap_err();
        match err {
            IndexError::ResourceNotFound { valid, .. } => assert!(valid.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_resources() {
        let temp_dir = corpus();
        let resources = list_resources(temp_dir.path(), &extensions()).unwrap();
        assert_eq!(resources.len(), 2);

        let postgres = resources
            .iter()
            .find(|r| r.identifier == "data/postgres")
            .unwrap();
        assert_eq!(postgres.name, "Postgres");
        assert_eq!(postgres.description, "Indexing patterns");
    }

    #[test]
    fn test_listing_reflects_new_files() {
        let temp_dir = corpus();
        assert_eq!(list_resources(temp_dir.path(), &extensions()).unwrap().len(), 2);

        fs::write(temp_dir.path().join("added.md"), "new doc").unwrap();
        assert_eq!(list_resources(temp_dir.path(), &extensions()).unwrap().len(), 3);
    }
}
