//! Markdown to HTML rendering.
//!
//! Built on pulldown-cmark with the GitHub-flavoured extensions switched on
//! (tables, strikethrough, task lists) plus footnotes. On top of the parser's
//! event stream three rewrites run in order:
//!
//! 1. **Hard wraps**: every soft line break becomes `<br />`, so a single
//!    newline in a recipe step shows up as a new line on the page.
//! 2. **Raw HTML**: dropped and replaced by `<!-- raw HTML omitted -->`
//!    unless the renderer was built with `unsafe_html`.
//! 3. **Linkify**: bare `http://`, `https://` and `www.` URLs in running
//!    text become links. Text inside code, links and images is left alone.
//!
//! The HTML writer emits self-closing void elements (`<br />`, `<hr />`,
//! `<img ... />`), so the output is also valid XHTML.

use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;
use std::sync::LazyLock;

const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:https?://|www\.)[^\s<>]*[^\s<>.,:;"'!?)\]*_~]"#).expect("valid URL regex")
});

/// Renders Markdown bodies to HTML fragments.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    unsafe_html: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MarkdownRenderer {
    pub fn new(unsafe_html: bool) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self {
            options,
            unsafe_html,
        }
    }

    /// Render a Markdown body to an HTML fragment.
    ///
    /// pulldown-cmark accepts every input, so there is no error path: malformed
    /// Markdown renders as literal text the way CommonMark specifies.
    pub fn render(&self, markdown: &str) -> String {
        let events = TextMergeStream::new(Parser::new_ext(markdown, self.options)).map(|event| {
            match event {
                Event::SoftBreak => Event::HardBreak,
                other => other,
            }
        });

        let events: Vec<Event> = if self.unsafe_html {
            events.collect()
        } else {
            omit_raw_html(events)
        };
        let events = linkify(events);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Render with the default renderer (raw HTML omitted).
pub fn render(markdown: &str) -> String {
    MarkdownRenderer::default().render(markdown)
}

fn omit_raw_html<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    for event in events {
        match event {
            Event::Start(Tag::HtmlBlock) => {
                out.push(Event::Start(Tag::HtmlBlock));
                out.push(Event::Html(CowStr::Borrowed("<!-- raw HTML omitted -->\n")));
            }
            Event::Html(_) => {}
            Event::InlineHtml(_) => out.push(Event::InlineHtml(CowStr::Borrowed(RAW_HTML_OMITTED))),
            other => out.push(other),
        }
    }
    out
}

fn linkify(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    // Nesting depth of code blocks, links and images.
    let mut protected = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Link { .. } | Tag::Image { .. }) => {
                protected += 1;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Link | TagEnd::Image) => {
                protected = protected.saturating_sub(1);
                out.push(event);
            }
            Event::Text(text) if protected == 0 && URL_RE.is_match(&text) => {
                push_linkified(&text, &mut out);
            }
            other => out.push(other),
        }
    }
    out
}

fn push_linkified<'a>(text: &str, out: &mut Vec<Event<'a>>) {
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        if m.start() > last {
            out.push(Event::Text(CowStr::from(text[last..m.start()].to_string())));
        }
        let url = m.as_str();
        let href = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));
        last = m.end();
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}
