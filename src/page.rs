//! The rendered page that the navigation tree scrolls.
//!
//! A page is the body of an HTML document flattened into display lines. Every element that
//! carries an identifier is anchored at the first line it produces, which is where node
//! activations and fragment navigation scroll to.

use crate::binder::Host;
use crate::heading::Level;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Elements whose text is rendered as its own block of lines.
const BLOCKS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "li",
    "dt",
    "dd",
    "tr",
    "caption",
    "figcaption",
    "blockquote",
];

/// Elements never rendered.
const SKIPPED: &[&str] = &["script", "style", "template", "noscript"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One line of page text.
pub struct PageLine {
    /// Text with whitespace collapsed (preformatted blocks keep theirs).
    pub text: String,
    /// Set when the line is an outline heading.
    pub heading: Option<Level>,
}

#[derive(Clone, Debug, Default)]
/// Flattened page text with anchors and a viewport.
pub struct Page {
    /// Display lines in document order.
    pub lines: Vec<PageLine>,
    anchors: HashMap<String, usize>,
    offset: usize,
    fragment: Option<String>,
}

impl Page {
    #[must_use]
    /// Flattens the document body into lines.
    ///
    /// # Panics
    ///
    /// Panics if the built-in body selector fails to parse, which cannot happen.
    pub fn from_html(document: &Html) -> Self {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("body").expect("static selector"));
        let body = document
            .select(selector)
            .next()
            .unwrap_or_else(|| document.root_element());

        let mut page = Self::default();
        page.push_element(body);
        debug!(
            lines = page.lines.len(),
            anchors = page.anchors.len(),
            "flattened page"
        );
        page
    }

    fn push_element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if SKIPPED.contains(&name) {
            return;
        }
        if let Some(id) = element.value().id() {
            self.anchors.entry(id.to_string()).or_insert(self.lines.len());
        }

        if name == "pre" {
            let text = element.text().collect::<String>();
            for line in text.trim_matches('\n').lines() {
                self.push_line(line.to_string(), None);
            }
            self.push_blank();
        } else if BLOCKS.contains(&name) {
            let text = element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                self.push_line(text, Level::from_tag(name));
                self.push_blank();
            }
        } else {
            for child in element.children() {
                if let Some(child) = ElementRef::wrap(child) {
                    self.push_element(child);
                } else if let Some(text) = child.value().as_text() {
                    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !text.is_empty() {
                        self.push_line(text, None);
                    }
                }
            }
        }
    }

    fn push_line(&mut self, text: String, heading: Option<Level>) {
        self.lines.push(PageLine { text, heading });
    }

    fn push_blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.text.is_empty()) {
            self.push_line(String::new(), None);
        }
    }

    #[must_use]
    /// Line currently at the top of the viewport.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    /// Current navigation fragment, if one was set.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Scrolls the viewport by `delta` lines, staying within the page.
    pub fn scroll_by(&mut self, delta: isize) {
        let last = self.lines.len().saturating_sub(1);
        self.offset = self.offset.saturating_add_signed(delta).min(last);
    }
}

impl Host for Page {
    fn offset_of(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.lines.len().saturating_sub(1));
        trace!(offset = self.offset, "scrolled page");
    }

    fn set_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
        // Unknown fragments leave the viewport where it is.
        if let Some(offset) = self.offset_of(id) {
            self.scroll_to(offset);
        }
    }
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
