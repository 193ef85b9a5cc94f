//! Outline extraction from rendered HTML.
//!
//! Every `h1` carrying an identifier starts a section. Its subsections are the `h2` siblings
//! that follow it up to the next `h1`, and each subsection's children are the `h3` siblings
//! that follow it up to the next `h1` or `h2`. Numbering restarts in every parent scope, so
//! the second section's subsections are `2.1`, `2.2`, ...
//!
//! Headings that cannot be navigated to are reported as [`Diagnostic`]s instead of failing
//! the whole extraction.

use crate::formats::LabelFormat;
use crate::heading::{HeadingNode, Level};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
/// A heading that breaks the outline's preconditions.
pub enum Diagnostic {
    /// The heading has no identifier, or an empty one; it is left out and takes no number.
    #[error("{level} {text:?} has no id and is left out of the outline")]
    MissingId {
        /// Depth of the offending heading.
        level: Level,
        /// Text content of the heading.
        text: String,
    },
    /// The identifier was already used by an earlier heading; navigation to it is ambiguous.
    #[error("{level} id {id:?} is already used by an earlier heading")]
    DuplicateId {
        /// Depth of the later heading.
        level: Level,
        /// The repeated identifier.
        id: String,
    },
    /// An `h3` with no identified `h2` before it in its section; it is left out.
    #[error("h3 {text:?} has no enclosing h2 and is left out of the outline")]
    Orphaned {
        /// Identifier of the heading, if it has one.
        id: Option<String>,
        /// Text content of the heading.
        text: String,
    },
    /// An `h2` or `h3` outside any identified section: before the first `h1`, or after an
    /// `h1` without an identifier. It is left out.
    #[error("{level} {text:?} is not inside an identified h1 and is left out of the outline")]
    Unsectioned {
        /// Depth of the offending heading.
        level: Level,
        /// Identifier of the heading, if it has one.
        id: Option<String>,
        /// Text content of the heading.
        text: String,
    },
}

impl Diagnostic {
    #[must_use]
    /// Whether the heading behind this diagnostic is missing from the outline.
    pub fn is_left_out(&self) -> bool {
        !matches!(self, Self::DuplicateId { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Numbered heading tree of a page plus everything that had to be left out of it.
pub struct Outline {
    /// Top-level sections in document order.
    pub roots: Vec<HeadingNode>,
    /// Precondition failures found while scanning, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Outline {
    #[must_use]
    /// Whether the page had no navigable sections.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[must_use]
    /// Total number of nodes at every level.
    pub fn len(&self) -> usize {
        self.roots.iter().map(HeadingNode::count).sum()
    }

    #[cfg(test)]
    /// First node, in document order, carrying the given identifier.
    pub(crate) fn find(&self, id: &str) -> Option<&HeadingNode> {
        let mut found = None;
        for root in &self.roots {
            root.walk(&mut |node| {
                if found.is_none() && node.id == id {
                    found = Some(node);
                }
            });
        }
        found
    }
}

/// Parses a page and extracts its outline.
#[must_use]
pub fn extract_str(html: &str, format: &dyn LabelFormat) -> Outline {
    extract(&Html::parse_document(html), format)
}

/// Extracts the outline of an already parsed page.
///
/// # Panics
///
/// Panics if the built-in heading selector fails to parse, which cannot happen.
#[must_use]
pub fn extract(document: &Html, format: &dyn LabelFormat) -> Outline {
    let mut scan = Scan {
        format,
        seen: HashSet::new(),
        diagnostics: Vec::new(),
    };
    let roots = scan.sections(document);
    debug!(
        sections = roots.len(),
        diagnostics = scan.diagnostics.len(),
        "extracted outline"
    );

    Outline {
        roots,
        diagnostics: scan.diagnostics,
    }
}

fn h1_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("h1").expect("static selector"))
}

/// Element siblings after `heading`, stopping before the first heading in `boundaries`.
fn following_until<'a>(
    heading: ElementRef<'a>,
    boundaries: &'static [Level],
) -> impl Iterator<Item = ElementRef<'a>> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(move |el| {
            Level::from_tag(el.value().name()).is_none_or(|level| !boundaries.contains(&level))
        })
}

/// Element siblings before `heading` back to the previous `h1`, in document order.
fn preceding_in_section(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut preceding: Vec<_> = heading
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| Level::from_tag(el.value().name()) != Some(Level::Section))
        .collect();
    preceding.reverse();
    preceding
}

fn heading_text(heading: ElementRef<'_>) -> String {
    heading
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

struct Scan<'f> {
    format: &'f dyn LabelFormat,
    seen: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Scan<'_> {
    fn sections(&mut self, document: &Html) -> Vec<HeadingNode> {
        let mut sections = Vec::new();
        let mut h1s = document.select(h1_selector()).peekable();

        if let Some(first) = h1s.peek() {
            self.unsectioned(preceding_in_section(*first));
        }

        for h1 in h1s {
            let Some(id) = self.identify(h1, Level::Section) else {
                self.unsectioned(following_until(h1, &[Level::Section]));
                continue;
            };
            let number = sections.len() + 1;
            let mut node = self.node(h1, id, &[number], Level::Section);
            node.children = self.subsections(h1, number);
            sections.push(node);
        }

        sections
    }

    fn unsectioned<'a>(&mut self, siblings: impl IntoIterator<Item = ElementRef<'a>>) {
        for sibling in siblings {
            let Some(level @ (Level::Subsection | Level::Subsubsection)) =
                Level::from_tag(sibling.value().name())
            else {
                continue;
            };
            self.report(Diagnostic::Unsectioned {
                level,
                id: sibling.value().id().map(ToString::to_string),
                text: heading_text(sibling),
            });
        }
    }

    fn subsections(&mut self, h1: ElementRef<'_>, section: usize) -> Vec<HeadingNode> {
        let mut subsections = Vec::new();
        let mut enclosed = false;

        for sibling in following_until(h1, &[Level::Section]) {
            match Level::from_tag(sibling.value().name()) {
                Some(Level::Subsection) => {
                    enclosed = match self.identify(sibling, Level::Subsection) {
                        Some(id) => {
                            let path = [section, subsections.len() + 1];
                            let mut node = self.node(sibling, id, &path, Level::Subsection);
                            node.children = self.subsubsections(sibling, path);
                            subsections.push(node);
                            true
                        }
                        None => false,
                    };
                }
                Some(Level::Subsubsection) if !enclosed => {
                    let diagnostic = Diagnostic::Orphaned {
                        id: sibling.value().id().map(ToString::to_string),
                        text: heading_text(sibling),
                    };
                    self.report(diagnostic);
                }
                _ => {}
            }
        }

        subsections
    }

    fn subsubsections(&mut self, h2: ElementRef<'_>, parent: [usize; 2]) -> Vec<HeadingNode> {
        let mut subsubsections = Vec::new();

        for sibling in following_until(h2, &[Level::Section, Level::Subsection]) {
            if Level::from_tag(sibling.value().name()) != Some(Level::Subsubsection) {
                continue;
            }
            if let Some(id) = self.identify(sibling, Level::Subsubsection) {
                let path = [parent[0], parent[1], subsubsections.len() + 1];
                subsubsections.push(self.node(sibling, id, &path, Level::Subsubsection));
            }
        }

        subsubsections
    }

    /// Identifier of a heading, or `None` (reported) when it cannot be navigated to.
    fn identify(&mut self, heading: ElementRef<'_>, level: Level) -> Option<String> {
        let Some(id) = heading.value().id().filter(|id| !id.trim().is_empty()) else {
            let text = heading_text(heading);
            self.report(Diagnostic::MissingId { level, text });
            return None;
        };

        if !self.seen.insert(id.to_string()) {
            self.report(Diagnostic::DuplicateId {
                level,
                id: id.to_string(),
            });
        }
        Some(id.to_string())
    }

    fn node(
        &self,
        heading: ElementRef<'_>,
        id: String,
        path: &[usize],
        level: Level,
    ) -> HeadingNode {
        let label = self.format.label(path, &heading_text(heading));
        HeadingNode::new(label, id, level)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
