//! Heading representation for the navigation outline.
//!
//! A heading node is one entry of the outline: a numbered display label, the identifier of
//! the heading element it points at, its depth, and its nested headings in document order.
//! Serialised, a node has exactly the `{label, id, level, children}` shape that list widgets
//! accept as `data`.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Depth of a heading in the outline, fixed by its element tag.
pub enum Level {
    /// `h1`: a top-level section.
    Section = 1,
    /// `h2`: a subsection.
    Subsection = 2,
    /// `h3`: a sub-subsection, always a leaf.
    Subsubsection = 3,
}

impl Level {
    #[must_use]
    /// Numeric depth, 1 for top-level sections.
    pub fn depth(self) -> usize {
        self as usize
    }

    #[must_use]
    /// Tag name of the heading element at this depth.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Section => "h1",
            Level::Subsection => "h2",
            Level::Subsubsection => "h3",
        }
    }

    #[must_use]
    /// Maps a heading tag name to its level, if it is one of `h1`..`h3`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Level::Section),
            "h2" => Some(Level::Subsection),
            "h3" => Some(Level::Subsubsection),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One heading in the outline together with the headings nested under it.
pub struct HeadingNode {
    /// Numeric path followed by the heading text, possibly wrapped in markup.
    pub label: String,
    /// Identifier attribute of the heading element.
    pub id: String,
    /// Depth of the heading.
    pub level: Level,
    /// Nested headings in document order; always empty for sub-subsections.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    #[must_use]
    /// Creates a childless node.
    pub fn new(label: impl Into<String>, id: impl Into<String>, level: Level) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            level,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// Number of nodes in this subtree, including the node itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(HeadingNode::count).sum::<usize>()
    }

    /// Visits this node and then its descendants, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a HeadingNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}
