//! Content directory scanning.
//!
//! Stage 1 of the build pipeline. Walks the content root recursively and turns
//! every Markdown file into a [`Page`]:
//!
//! ```text
//! read file → split front matter → enrich metadata → render HTML
//! ```
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── cocktails/                   # Directory name becomes `category`
//! │   ├── negroni.md               # slug "negroni", category "cocktails"
//! │   └── Old Fashioned.md         # slug "old-fashioned"
//! └── coffee/
//!     └── pour-over.md
//! ```
//!
//! Any regular file whose name ends in `.md` is a page, at any depth. Other
//! files are ignored. Entries are visited in file-name order, so the page list
//! (and `pages.json`) is stable across runs.
//!
//! ## Failure
//!
//! There is no skip-and-continue: the first unreadable file or malformed front
//! matter aborts the scan and nothing is written.

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontMatterError};
use crate::markdown::MarkdownRenderer;
use crate::metadata;
use crate::types::Page;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const MARKDOWN_EXTENSION: &str = ".md";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walking content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Turns single Markdown sources into pages with a fixed configuration.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    renderer: MarkdownRenderer,
    words_per_minute: u32,
}

impl PageBuilder {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            renderer: MarkdownRenderer::new(config.markdown.unsafe_html),
            words_per_minute: config.reading.words_per_minute,
        }
    }

    /// Build a page from already-read source text. `path` is only used to
    /// derive `slug` and `category`.
    pub fn build_page(&self, path: &Path, source: &str) -> Result<Page, FrontMatterError> {
        let (mut metadata, body) = frontmatter::split_front_matter(source)?;
        metadata::enrich(&mut metadata, path, body, self.words_per_minute);
        let content = self.renderer.render(body);
        Ok(Page { metadata, content })
    }

    /// Read and build the page at `path`. Bytes that are not UTF-8 become
    /// U+FFFD rather than failing the file.
    pub fn process_file(&self, path: &Path) -> Result<Page, ScanError> {
        let bytes = fs::read(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        self.build_page(path, &source)
            .map_err(|source| ScanError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new(&SiteConfig::default())
    }
}

/// Scan `root` recursively and build every Markdown page beneath it.
pub fn scan(root: &Path, config: &SiteConfig) -> Result<Vec<Page>, ScanError> {
    let builder = PageBuilder::new(config);
    let mut pages = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !is_markdown_file(&entry) {
            continue;
        }
        pages.push(builder.process_file(entry.path())?);
    }

    Ok(pages)
}

fn is_markdown_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_string_lossy()
            .ends_with(MARKDOWN_EXTENSION)
}
