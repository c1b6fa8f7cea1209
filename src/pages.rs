//! The `pages.json` collection.
//!
//! Stage 2 persists the scanned pages as a pretty-printed JSON array; the
//! feed stage and the site front end both read it back. The file is
//! overwritten in place, not swapped in atomically.

use crate::types::Page;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagesError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize `pages` with two-space indentation.
pub fn to_json(pages: &[Page]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pages)
}

/// Write `pages` to `path`, creating parent directories as needed.
pub fn write_pages(pages: &[Page], path: &Path) -> Result<(), PagesError> {
    let json = to_json(pages).map_err(|source| PagesError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source| PagesError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, json).map_err(io_err)
}

/// Read a page collection previously written by [`write_pages`].
pub fn read_pages(path: &Path) -> Result<Vec<Page>, PagesError> {
    let content = fs::read_to_string(path).map_err(|source| PagesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PagesError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_pages() -> Vec<Page> {
        let metadata: Metadata = serde_json::from_value(json!({
            "title": "Negroni",
            "slug": "negroni",
            "category": "cocktails",
            "categories": ["gin", "bitter"],
            "abv": 24.5,
            "read_time": 1
        }))
        .unwrap();
        vec![
            Page {
                metadata,
                content: "<p>Equal parts.</p>\n".into(),
            },
            Page {
                metadata: Metadata::new(),
                content: String::new(),
            },
        ]
    }

    #[test]
    fn json_uses_two_space_indent() {
        let json = to_json(&sample_pages()[..1]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"metadata\": {\n      \"abv\": 24.5,"));
        assert!(json.contains("\n    \"content\": \"<p>Equal parts.</p>\\n\"\n"));
    }

    #[test]
    fn empty_collection_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn written_pages_read_back_equal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.json");
        let pages = sample_pages();

        write_pages(&pages, &path).unwrap();
        assert_eq!(read_pages(&path).unwrap(), pages);
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("static/data/pages.json");

        write_pages(&sample_pages(), &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn write_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.json");
        fs::write(&path, "stale").unwrap();

        write_pages(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = read_pages(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(PagesError::Io { .. })));
    }

    #[test]
    fn read_malformed_json_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.json");
        fs::write(&path, "{\"metadata\": ").unwrap();

        let result = read_pages(&path);
        assert!(matches!(result, Err(PagesError::Json { .. })));
    }
}
