//! Front-matter splitting.
//!
//! A document may open with a YAML block fenced by `---`:
//!
//! ```text
//! ---
//! title: Negroni
//! categories: [gin, bitter]
//! ---
//! Equal parts, stirred.
//! ```
//!
//! The content is split on the first two `---` occurrences only; anything
//! after the second one is body text and is kept verbatim, even if it
//! contains further `---` lines (e.g. Markdown thematic breaks).

use crate::types::Metadata;
use std::collections::BTreeMap;
use thiserror::Error;

pub const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid front-matter format: no closing `---` delimiter")]
    Unterminated,
    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split `content` into its front-matter metadata and Markdown body.
///
/// Content that does not start with `---` has no front matter: the metadata
/// is empty and the body is the whole input. An empty or `null` block also
/// yields empty metadata.
pub fn split_front_matter(content: &str) -> Result<(Metadata, &str), FrontMatterError> {
    if !content.starts_with(DELIMITER) {
        return Ok((Metadata::new(), content));
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    let [_, yaml, body] = parts[..] else {
        return Err(FrontMatterError::Unterminated);
    };

    Ok((parse_yaml(yaml)?, body))
}

fn parse_yaml(yaml: &str) -> Result<Metadata, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let map: Option<BTreeMap<String, serde_json::Value>> = serde_yaml::from_str(yaml)?;
    Ok(map.map(Metadata::from).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_front_matter_returns_content_unchanged() {
        let content = "# Old Fashioned\n\nSugar, bitters, whiskey.";
        let (meta, body) = split_front_matter(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn delimiter_not_at_start_is_not_front_matter() {
        let content = "\n---\ntitle: x\n---\nbody";
        let (meta, body) = split_front_matter(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn parses_metadata_and_body() {
        let content = "---\ntitle: Negroni\ndate: 2024-03-01\ncategories:\n  - gin\n  - bitter\n---\nEqual parts.\n";
        let (meta, body) = split_front_matter(content).unwrap();

        assert_eq!(meta.title(), Some("Negroni"));
        assert_eq!(meta.str_field("date"), Some("2024-03-01"));
        assert_eq!(meta.get("categories"), Some(&json!(["gin", "bitter"])));
        assert_eq!(body, "\nEqual parts.\n");
    }

    #[test]
    fn numbers_and_booleans_keep_their_types() {
        let content = "---\nabv: 24.5\nrating: 4\ndraft: false\n---\n";
        let (meta, _) = split_front_matter(content).unwrap();
        assert_eq!(meta.get("abv"), Some(&json!(24.5)));
        assert_eq!(meta.get("rating"), Some(&json!(4)));
        assert_eq!(meta.get("draft"), Some(&json!(false)));
    }

    #[test]
    fn body_keeps_later_delimiters() {
        let content = "---\ntitle: Rule\n---\nabove\n\n---\n\nbelow\n";
        let (meta, body) = split_front_matter(content).unwrap();
        assert_eq!(meta.title(), Some("Rule"));
        assert_eq!(body, "\nabove\n\n---\n\nbelow\n");
    }

    #[test]
    fn missing_closing_delimiter_is_error() {
        let result = split_front_matter("---\ntitle: Open\n\nno closing fence");
        assert!(matches!(result, Err(FrontMatterError::Unterminated)));
    }

    #[test]
    fn empty_block_gives_empty_metadata() {
        let (meta, body) = split_front_matter("---\n---\nbody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn null_block_gives_empty_metadata() {
        let (meta, _) = split_front_matter("---\n~\n---\nbody").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn invalid_yaml_is_error() {
        let result = split_front_matter("---\ntitle: [unclosed\n---\nbody");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn non_mapping_yaml_is_error() {
        let result = split_front_matter("---\n- just\n- a list\n---\nbody");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }
}
