//! CLI output formatting for all pipeline stages.
//!
//! Output is information-first: each page is listed by positional index and
//! title, with its slug, date and reading time as indented context lines.
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 cocktails (2 pages)
//!     001 Negroni
//!         Slug: negroni
//!         Date: 2024-03-01
//!         Read time: 1 min
//!     002 Old Fashioned
//!         Slug: old-fashioned
//!
//! 5 pages in 3 categories
//! ```
//!
//! ## Feed
//!
//! ```text
//! Feed: Patrick's Bevs → static/rss.xml
//!     001 Negroni → https://bev.pdewey.com/negroni
//!
//! 5 items
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::catalog::group_by_category;
use crate::types::Page;
use rss::Channel;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Title to show for a page: its `title`, else its slug in parens.
fn page_label(page: &Page) -> String {
    match (page.metadata.title(), page.metadata.slug()) {
        (Some(t), _) if !t.is_empty() => t.to_string(),
        (_, Some(s)) => format!("({s})"),
        _ => "(untitled)".to_string(),
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned pages grouped by category.
pub fn format_scan_output(pages: &[Page]) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    let groups = group_by_category(pages);

    for (gi, group) in groups.iter().enumerate() {
        let name = if group.name.is_empty() {
            "(uncategorized)"
        } else {
            group.name
        };
        lines.push(format!(
            "{} {} ({})",
            format_index(gi + 1),
            name,
            count(group.pages.len(), "page", "pages")
        ));

        for (pi, page) in group.pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(pi + 1),
                page_label(page)
            ));
            if let Some(slug) = page.metadata.slug() {
                lines.push(format!("{}Slug: {}", indent(2), slug));
            }
            if let Some(date) = page.metadata.str_field("date") {
                lines.push(format!("{}Date: {}", indent(2), date));
            }
            if let Some(minutes) = page.metadata.read_time().filter(|m| *m > 0) {
                lines.push(format!("{}Read time: {} min", indent(2), minutes));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} in {}",
        count(pages.len(), "page", "pages"),
        count(groups.len(), "category", "categories")
    ));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(pages: &[Page]) {
    for line in format_scan_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Feed output
// ============================================================================

/// Format the generated feed: channel title, output path, and item links.
pub fn format_feed_output(channel: &Channel, output: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Feed: {} \u{2192} {}",
        channel.title(),
        output.display()
    )];
    for (i, item) in channel.items().iter().enumerate() {
        lines.push(format!(
            "{}{} {} \u{2192} {}",
            indent(1),
            format_index(i + 1),
            item.title().unwrap_or("(untitled)"),
            item.link().unwrap_or_default()
        ));
    }
    lines.push(String::new());
    lines.push(count(channel.items().len(), "item", "items"));
    lines
}

/// Print feed output to stdout.
pub fn print_feed_output(channel: &Channel, output: &Path) {
    for line in format_feed_output(channel, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Single page
// ============================================================================

/// Format one page: every metadata field, then a plain-text content preview.
pub fn format_page_output(page: &Page) -> Vec<String> {
    let mut lines = vec![page_label(page)];
    for (key, value) in page.metadata.iter() {
        let shown = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("{}{}: {}", indent(1), key, shown));
    }
    let plain = strip_html_tags(&page.content);
    let preview = truncate_desc(plain.split_whitespace().collect::<Vec<_>>().join(" ").as_str(), 72);
    if !preview.is_empty() {
        lines.push(format!("{}{}", indent(1), preview));
    }
    lines
}

/// Print a single page to stdout.
pub fn print_page_output(page: &Page) {
    for line in format_page_output(page) {
        println!("{}", line);
    }
}
