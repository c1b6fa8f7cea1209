//! `content/config.toml`: feed channel, reading speed and raw HTML handling.
//!
//! The file is optional and sparse. It is laid over the built-in defaults
//! table by table, so `[feed]` with only `title` keeps the default `link` and
//! `description`:
//!
//! ```toml
//! [feed]
//! title = "Patrick's Bevs"
//! link = "https://bev.pdewey.com"       # Item links are <link>/<slug>
//! description = "RSS feed of Patrick Dewey's bev website"
//!
//! [reading]
//! words_per_minute = 200                # Used for read_time
//!
//! [markdown]
//! unsafe_html = false                   # Pass raw HTML through untouched
//! ```
//!
//! A misspelled key is an error, not a silently ignored setting.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {CONFIG_FILE}: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid {CONFIG_FILE}: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// RSS channel settings.
    pub feed: FeedConfig,
    /// Reading-time estimate settings.
    pub reading: ReadingConfig,
    /// Markdown rendering settings.
    pub markdown: MarkdownConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than 0".into(),
            ));
        }
        if self.feed.title.trim().is_empty() {
            return Err(ConfigError::Validation("feed.title must not be empty".into()));
        }
        if !(self.feed.link.starts_with("http://") || self.feed.link.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "feed.link must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

/// RSS channel metadata. These are fixed per site, never taken from pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub title: String,
    /// Site base URL; also the prefix for every item link.
    pub link: String,
    pub description: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "Patrick's Bevs".to_string(),
            link: "https://bev.pdewey.com".to_string(),
            description: "RSS feed of Patrick Dewey's bev website".to_string(),
        }
    }
}

impl FeedConfig {
    /// Absolute URL of the page with `slug`.
    pub fn item_link(&self, slug: &str) -> String {
        format!("{}/{}", self.link.trim_end_matches('/'), slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: crate::metadata::DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Keep raw HTML from Markdown sources instead of replacing it with a
    /// `<!-- raw HTML omitted -->` marker.
    pub unsafe_html: bool,
}

/// Built-in defaults as a TOML table, the base every user file is laid over.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("defaults do not serialize: {e}")))
}

/// Lay `overlay` over `base`. Tables combine per key at every depth; any
/// other overlay value wins outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(over)) => {
            for (key, value) in over {
                let value = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, value);
            }
            toml::Value::Table(table)
        }
        (_, other) => other,
    }
}

/// Parse `dir/config.toml` without applying defaults. `None` when absent.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
    Ok(Some(toml::from_str(&text)?))
}

/// Apply `overlay` (if any) to `base`, deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlay.into_iter().fold(base, merge_toml);
    let config = SiteConfig::deserialize(merged)?;
    config.validate()?;
    Ok(config)
}

/// The effective configuration for the content root at `root`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# bevgen configuration
# =====================
# Place this file as config.toml in the content directory.
# Every key is optional; remove anything you don't want to change.

# -----------------------------------------------------------------------------
# RSS feed channel
# -----------------------------------------------------------------------------
[feed]
# Channel title shown by feed readers.
title = "Patrick's Bevs"
# Site base URL. Each item links to <link>/<slug>.
link = "https://bev.pdewey.com"
# Channel description.
description = "RSS feed of Patrick Dewey's bev website"

# -----------------------------------------------------------------------------
# Reading time
# -----------------------------------------------------------------------------
[reading]
# Words per minute used to compute each page's read_time.
words_per_minute = 200

# -----------------------------------------------------------------------------
# Markdown
# -----------------------------------------------------------------------------
[markdown]
# By default raw HTML in Markdown is replaced with <!-- raw HTML omitted -->.
# Set to true to pass it through as-is.
unsafe_html = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_feed_channel() {
        let config = SiteConfig::default();
        assert_eq!(config.feed.title, "Patrick's Bevs");
        assert_eq!(config.feed.link, "https://bev.pdewey.com");
        assert_eq!(config.reading.words_per_minute, 200);
        assert!(!config.markdown.unsafe_html);
    }

    #[test]
    fn item_link_joins_with_single_slash() {
        let mut feed = FeedConfig::default();
        assert_eq!(feed.item_link("negroni"), "https://bev.pdewey.com/negroni");
        feed.link = "https://example.com/".into();
        assert_eq!(feed.item_link("negroni"), "https://example.com/negroni");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[feed]
title = "Drinks"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.title, "Drinks");
        assert_eq!(config.feed.link, "https://bev.pdewey.com");
        assert_eq!(config.reading.words_per_minute, 200);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[reading]
words_per_minute = 250

[markdown]
unsafe_html = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.reading.words_per_minute, 250);
        assert!(config.markdown.unsafe_html);
        assert_eq!(config.feed, FeedConfig::default());
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_words_per_minute_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[reading]\nwords_per_minute = 0\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_link_rejected() {
        let mut config = SiteConfig::default();
        config.feed.link = "bev.pdewey.com".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("[feed]\ntitle = \"a\"\nlink = \"b\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[feed]\ntitle = \"c\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        let feed = merged.get("feed").unwrap();
        assert_eq!(feed.get("title").unwrap().as_str(), Some("c"));
        assert_eq!(feed.get("link").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[feed]\ntitel = \"x\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[images]\nquality = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
