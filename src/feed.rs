//! RSS 2.0 feed generation.
//!
//! Stage 3 of the build pipeline. Projects the page collection into a single
//! RSS channel:
//!
//! | RSS field | Source |
//! |-----------|--------|
//! | channel `title`/`link`/`description` | `[feed]` in `config.toml` |
//! | channel `pubDate` | generation time |
//! | item `title` | `metadata.title` (required string) |
//! | item `link` | `feed.link` + `/` + `metadata.slug` (required string) |
//! | item `description` | rendered HTML |
//! | item `pubDate` | `metadata.date` verbatim when it is a string, else empty |
//! | item `category` | string entries of `metadata.categories` joined by `", "`, possibly empty |
//!
//! Every item carries the same five elements, empty ones included.
//!
//! A page without a string `title` or `slug` fails the whole feed; there is no
//! partial feed with the bad page skipped.

use crate::config::FeedConfig;
use crate::pages::{self, PagesError};
use crate::types::{MetadataError, Page};
use chrono::{DateTime, Local, TimeZone};
use rss::{CategoryBuilder, Channel, ChannelBuilder, Item, ItemBuilder};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Declaration written at the top of every feed.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error(transparent)]
    Pages(#[from] PagesError),
    #[error("page {index} ({label}): {source}")]
    Field {
        index: usize,
        label: String,
        #[source]
        source: MetadataError,
    },
    #[error("RSS serialization failed: {0}")]
    Rss(#[from] rss::Error),
    #[error("RSS output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read `pages.json` at `input` and write the RSS feed to `output`.
pub fn generate_feed(input: &Path, output: &Path, config: &FeedConfig) -> Result<Channel, FeedError> {
    let pages = pages::read_pages(input)?;
    let channel = build_channel(&pages, config, Local::now())?;
    write_feed(&channel, output)?;
    Ok(channel)
}

/// Build the channel for `pages`, stamped with `generated_at`.
pub fn build_channel<Tz>(
    pages: &[Page],
    config: &FeedConfig,
    generated_at: DateTime<Tz>,
) -> Result<Channel, FeedError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items = pages
        .iter()
        .enumerate()
        .map(|(index, page)| page_to_item(page, config).map_err(|source| field_error(index, page, source)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.link.clone())
        .description(config.description.clone())
        .pub_date(Some(generated_at.format(PUB_DATE_FORMAT).to_string()))
        .items(items)
        .build())
}

/// Serialize `channel` as indented XML with the standard declaration.
pub fn render_feed(channel: &Channel) -> Result<String, FeedError> {
    let bytes = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    let xml = String::from_utf8(bytes)?;
    Ok(format!("{XML_HEADER}{}", strip_declaration(&xml)))
}

/// Render `channel` and write it to `path`, creating parent directories.
pub fn write_feed(channel: &Channel, path: &Path) -> Result<(), FeedError> {
    let xml = render_feed(channel)?;
    let io_err = |source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, xml).map_err(io_err)
}

/// Convert one page to an RSS item.
pub fn page_to_item(page: &Page, config: &FeedConfig) -> Result<Item, MetadataError> {
    let title = page.metadata.require_str("title")?;
    let slug = page.metadata.require_str("slug")?;

    let category = CategoryBuilder::default()
        .name(page.metadata.string_list("categories").join(", "))
        .build();

    Ok(ItemBuilder::default()
        .title(Some(title.to_string()))
        .link(Some(config.item_link(slug)))
        .description(Some(page.content.clone()))
        .pub_date(Some(page.metadata.str_field("date").unwrap_or_default().to_string()))
        .categories(vec![category])
        .build())
}

fn field_error(index: usize, page: &Page, source: MetadataError) -> FeedError {
    let label = page
        .metadata
        .slug()
        .or_else(|| page.metadata.title())
        .unwrap_or("untitled")
        .to_string();
    FeedError::Field {
        index,
        label,
        source,
    }
}

/// Drop a leading `<?xml ...?>` declaration so ours is the only one.
fn strip_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    match trimmed.strip_prefix("<?xml") {
        Some(rest) => rest
            .split_once("?>")
            .map(|(_, body)| body.trim_start())
            .unwrap_or(trimmed),
        None => trimmed,
    }
}
