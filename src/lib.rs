//! # bevgen
//!
//! Turns a directory of Markdown notes into the two data files a static drinks
//! site needs: a JSON collection of rendered pages and an RSS feed.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan   content/**/*.md  →  Vec<Page>              (front matter + HTML)
//! 2. Pages  Vec<Page>        →  static/data/pages.json (pretty JSON)
//! 3. Feed   pages.json       →  static/rss.xml         (RSS 2.0)
//! ```
//!
//! The feed stage reads `pages.json` back from disk instead of taking the
//! scanned pages directly. The JSON file is the contract between the stages
//! and with the site front end, and the feed can be rebuilt from it alone.
//!
//! Everything runs on one thread, in file-name order, and stops at the first
//! error. A run either writes both files or reports one error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits the leading `---` YAML block from the Markdown body |
//! | [`metadata`] | Derives `slug`, `category` and `read_time` |
//! | [`markdown`] | Renders Markdown to XHTML-style HTML with GFM extensions |
//! | [`scan`] | Stage 1: walks the content root and builds every page |
//! | [`pages`] | Stage 2: writes and reads `pages.json` |
//! | [`feed`] | Stage 3: projects pages into an RSS 2.0 channel |
//! | [`catalog`] | Category grouping and `(category, slug)` lookup |
//! | [`pipeline`] | Stage orchestration used by the CLI |
//! | [`config`] | Optional `config.toml`: feed channel, reading speed, raw HTML |
//! | [`types`] | `Page` and the open `Metadata` map |
//! | [`output`] | CLI output formatting |
//!
//! # Metadata Model
//!
//! Front matter is an open mapping, so [`types::Metadata`] keeps every value as
//! a tagged JSON value and exposes typed accessors for the handful of keys the
//! pipeline itself reads. Fields the feed requires (`title`, `slug`) are
//! extracted with [`types::Metadata::require_str`], which names the missing or
//! mistyped field in its error.

pub mod catalog;
pub mod config;
pub mod feed;
pub mod frontmatter;
pub mod markdown;
pub mod metadata;
pub mod output;
pub mod pages;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
