//! Category views over a page collection.
//!
//! The site front end lists pages grouped by their `category` field and
//! resolves `/<category>/<slug>` URLs to a single page. Both operations live
//! here so the CLI can show the same structure the site will.

use crate::types::Page;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("no page with slug `{slug}` in category `{category}`")]
    NotFound { category: String, slug: String },
}

/// Pages sharing one `category` value, in collection order.
#[derive(Debug)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub pages: Vec<&'a Page>,
}

/// Group pages by `category`, groups ordered by first appearance.
///
/// Pages with no string `category` (an explicit `slug` without one) land in a
/// group named `""`.
pub fn group_by_category(pages: &[Page]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for page in pages {
        let name = page.metadata.category().unwrap_or("");
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.pages.push(page),
            None => groups.push(CategoryGroup {
                name,
                pages: vec![page],
            }),
        }
    }
    groups
}

/// Find the page whose `category` and `slug` both match.
pub fn find_page<'a>(pages: &'a [Page], category: &str, slug: &str) -> Result<&'a Page, CatalogError> {
    pages
        .iter()
        .find(|p| p.metadata.category() == Some(category) && p.metadata.slug() == Some(slug))
        .ok_or_else(|| CatalogError::NotFound {
            category: category.to_string(),
            slug: slug.to_string(),
        })
}
