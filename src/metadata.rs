//! Derived metadata fields.
//!
//! After front matter is parsed, every page gets three fields filled in:
//!
//! - **`slug`**: from the filename stem, unless front matter already has one.
//!   `content/cocktails/Old Fashioned.md` becomes `old-fashioned`.
//! - **`category`**: the name of the directory holding the file. This is only
//!   derived together with the slug. A page with an explicit `slug` keeps
//!   whatever `category` its front matter says, even none at all.
//! - **`read_time`**: estimated minutes to read the raw Markdown body. Always
//!   recomputed, so a stale value in front matter is overwritten.
//!
//! The plural `categories` list is a separate, free-form front-matter field
//! used by the feed; nothing here touches it.

use crate::types::Metadata;
use std::path::Path;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Turn a title or filename stem into a URL slug.
///
/// Trims surrounding whitespace, lowercases, turns spaces into hyphens and
/// removes periods. Nothing else is touched.
///
/// ```
/// use bevgen::metadata::generate_slug;
///
/// assert_eq!(generate_slug("My Post.v2"), "my-postv2");
/// ```
pub fn generate_slug(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace('.', "")
}

/// Minutes needed to read `text`, rounded to the nearest whole minute.
///
/// Words are whitespace-separated tokens. Halves round up, so 100 words at
/// 200 wpm is one minute; anything under that is zero.
pub fn reading_time(text: &str, words_per_minute: u32) -> u64 {
    let words = text.split_whitespace().count();
    (words as f64 / f64::from(words_per_minute.max(1))).round() as u64
}

/// Fill in `slug`, `category` and `read_time` for the page read from `path`.
///
/// `body` is the Markdown text after front matter, before rendering.
pub fn enrich(metadata: &mut Metadata, path: &Path, body: &str, words_per_minute: u32) {
    if !metadata.contains_key("slug") {
        metadata.insert("slug", generate_slug(&file_stem(path)));
        metadata.insert("category", parent_dir_name(path));
    }
    metadata.insert("read_time", reading_time(body, words_per_minute));
}

/// File name up to its last `.`, so `Old Fashioned.md` gives `Old Fashioned`
/// and a bare `.md` gives an empty stem.
fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

fn parent_dir_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}
