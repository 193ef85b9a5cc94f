//! Label formats for the two flavours of navigation tree.
//!
//! This module defines the `LabelFormat` trait which abstracts over how a heading's numeric
//! path is rendered into its label (plain `2.3.1` or wrapped in a styling span), whether the
//! widget should escape those labels, and how a label is displayed in the terminal.

pub mod markup;
pub mod plain;

use ratatui::text::Line;

/// Renders numbered labels for outline nodes.
pub trait LabelFormat {
    /// Renders the numeric path, e.g. `[2, 3, 1]`, as it appears in the label.
    fn number(&self, path: &[usize]) -> String;

    /// Whether a widget should show labels verbatim instead of interpreting their markup.
    fn auto_escape(&self) -> bool;

    /// Styled terminal line for a label produced by this format.
    fn display(&self, label: &str) -> Line<'static>;

    /// Full label: the rendered number, a space, then the heading text.
    fn label(&self, path: &[usize], text: &str) -> String {
        format!("{} {text}", self.number(path))
    }
}

/// Dotted numeric path, `2.3.1` for `[2, 3, 1]`.
#[must_use]
pub fn dotted(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
