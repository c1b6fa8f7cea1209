//! Stage orchestration shared by the CLI commands.
//!
//! ```text
//! build = scan → write pages.json → read pages.json → write rss.xml
//! ```
//!
//! The feed is always generated from the JSON on disk, never from the
//! in-memory pages, so `bevgen feed` on its own produces the same feed as a
//! full build.

use crate::catalog::{self, CatalogError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::feed::{self, FeedError};
use crate::pages::{self, PagesError};
use crate::scan::{self, ScanError};
use crate::types::Page;
use chrono::Local;
use rss::Channel;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Error loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("Error processing directory: {0}")]
    Scan(#[from] ScanError),
    #[error("Error writing pages: {0}")]
    Pages(#[from] PagesError),
    #[error("Error writing feed: {0}")]
    Feed(#[from] FeedError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

/// Where a build reads from and writes to.
#[derive(Debug, Clone)]
pub struct Paths {
    pub source: PathBuf,
    pub json: PathBuf,
    pub rss: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            source: PathBuf::from("content"),
            json: PathBuf::from("static/data/pages.json"),
            rss: PathBuf::from("static/rss.xml"),
        }
    }
}

/// Result of a full build.
#[derive(Debug)]
pub struct BuildOutput {
    pub pages: Vec<Page>,
    pub channel: Channel,
}

/// Scan the content root and write `pages.json`.
pub fn run_scan(paths: &Paths) -> Result<Vec<Page>, BuildError> {
    let config = config::load_config(&paths.source)?;
    let pages = scan::scan(&paths.source, &config)?;
    pages::write_pages(&pages, &paths.json)?;
    Ok(pages)
}

/// Generate the feed from an existing `pages.json`.
pub fn run_feed(paths: &Paths) -> Result<Channel, BuildError> {
    let config = config::load_config(&paths.source)?;
    Ok(feed::generate_feed(&paths.json, &paths.rss, &config.feed)?)
}

/// Full pipeline: scan, write JSON, then build the feed from that JSON.
pub fn run_build(paths: &Paths) -> Result<BuildOutput, BuildError> {
    let config = config::load_config(&paths.source)?;
    let pages = scan::scan(&paths.source, &config)?;
    pages::write_pages(&pages, &paths.json)?;
    let channel = feed::generate_feed(&paths.json, &paths.rss, &config.feed)?;
    Ok(BuildOutput { pages, channel })
}

/// Scan and check every page would make a valid feed item. Writes nothing.
pub fn check(source: &Path) -> Result<Vec<Page>, BuildError> {
    let config = config::load_config(source)?;
    let pages = scan::scan(source, &config)?;
    validate_feed(&pages, &config)?;
    Ok(pages)
}

fn validate_feed(pages: &[Page], config: &SiteConfig) -> Result<(), BuildError> {
    feed::build_channel(pages, &config.feed, Local::now())?;
    Ok(())
}

/// Look up a page in `pages.json` by category and slug.
pub fn show(json: &Path, category: &str, slug: &str) -> Result<Page, BuildError> {
    let pages = pages::read_pages(json)?;
    Ok(catalog::find_page(&pages, category, slug)?.clone())
}
