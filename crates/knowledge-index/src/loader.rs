//! Document loading from the knowledge root directory.
//!
//! Walks the directory recursively and reads every recognized file into
//! a `Document` with a stable path-derived identifier. Enumeration is
//! best-effort: an unreadable file is skipped, not fatal.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::IndexError;

/// Category assigned to documents at the knowledge root.
pub const DEFAULT_CATEGORY: &str = "general";

/// A loaded knowledge document. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier derived from the path relative to the knowledge root,
    /// separators normalized to `/`, extension stripped.
    pub identifier: String,
    /// Full file contents, front matter included.
    pub raw_text: String,
}

/// Load all documents under `root` whose extension is in `extensions`,
/// sorted by identifier.
///
/// Fails only when `root` itself is missing; individual files that cannot
/// be read are logged and skipped.
pub fn load_documents(root: &Path, extensions: &[String]) -> Result<Vec<Document>, IndexError> {
    if !root.is_dir() {
        return Err(IndexError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(identifier) = identifier_for(root, entry.path(), extensions) else {
            continue;
        };
        match fs::read_to_string(entry.path()) {
            Ok(raw_text) => documents.push(Document {
                identifier,
                raw_text,
            }),
            Err(e) => {
                warn!(path = ?entry.path(), error = %e, "Skipping unreadable document");
            }
        }
    }

    // Stable ordering keeps builds deterministic and tie-breaks meaningful.
    documents.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    debug!(root = ?root, count = documents.len(), "Loaded knowledge documents");
    Ok(documents)
}

/// Derive the identifier for a file, or `None` if its extension is not in
/// `extensions` (compared case-insensitively).
pub fn identifier_for(root: &Path, path: &Path, extensions: &[String]) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(extension)) {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// The category of an identifier: its first path segment, or
/// [`DEFAULT_CATEGORY`] for documents at the root.
pub fn category_of(identifier: &str) -> &str {
    match identifier.split_once('/') {
        Some((category, _)) => category,
        None => DEFAULT_CATEGORY,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
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

    fn write_doc(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = load_documents(&missing, &extensions()).unwrap_err();
        assert!(matches!(err, IndexError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_load_nested_documents() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(temp_dir.path(), "data/postgres.md", "postgres content");
        write_doc(temp_dir.path(), "stacks/react.md", "react content");
        write_doc(temp_dir.path(), "readme.txt", "top level");

        let docs = load_documents(temp_dir.path(), &extensions()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["data/postgres", "readme", "stacks/react"]);
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(temp_dir.path(), "notes.md", "kept");
        write_doc(temp_dir.path(), "image.png", "skipped");
        write_doc(temp_dir.path(), "binary", "skipped");

        let docs = load_documents(temp_dir.path(), &extensions()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].identifier, "notes");
    }

    #[test]
    fn test_configured_extensions_override_defaults() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(temp_dir.path(), "kept.adoc", "asciidoc content");
        write_doc(temp_dir.path(), "skipped.md", "markdown content");

        let docs = load_documents(temp_dir.path(), &["adoc".to_string()]).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].identifier, "kept");
    }

    #[test]
    fn test_hidden_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(temp_dir.path(), ".hidden.md", "skipped");
        write_doc(temp_dir.path(), ".git/config.md", "skipped");
        write_doc(temp_dir.path(), "visible.md", "kept");

        let docs = load_documents(temp_dir.path(), &extensions()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].identifier, "visible");
    }

    #[test]
    fn test_empty_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let docs = load_documents(temp_dir.path(), &extensions()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_extension_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(temp_dir.path(), "upper.MD", "kept");

        let docs = load_documents(temp_dir.path(), &extensions()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].identifier, "upper");
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("data/postgres"), "data");
        assert_eq!(category_of("stacks/frontend/react"), "stacks");
        assert_eq!(category_of("readme"), DEFAULT_CATEGORY);
    }
}
