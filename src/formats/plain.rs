//! Plain labels: the dotted number and the heading text, shown verbatim.

use crate::formats::{dotted, LabelFormat};
use ratatui::text::Line;

/// Labels such as `2.3.1 Configuration`.
pub struct PlainFormat;

impl LabelFormat for PlainFormat {
    fn number(&self, path: &[usize]) -> String {
        dotted(path)
    }

    fn auto_escape(&self) -> bool {
        true
    }

    fn display(&self, label: &str) -> Line<'static> {
        Line::raw(label.to_string())
    }
}
