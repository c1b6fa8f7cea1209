//! Shared test utilities for the bevgen test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let pages = scan(tmp.path(), &SiteConfig::default()).unwrap();
//!
//! let negroni = find_page(&pages, "negroni");
//! assert_eq!(negroni.metadata.category(), Some("cocktails"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_md(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Page lookups (panic with the available slugs on a miss)
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(pages: &'a [Page], slug: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.metadata.slug() == Some(slug))
        .unwrap_or_else(|| panic!("page '{slug}' not found. Available: {:?}", page_slugs(pages)))
}

/// All page slugs in collection order.
pub fn page_slugs(pages: &[Page]) -> Vec<&str> {
    pages.iter().filter_map(|p| p.metadata.slug()).collect()
}
