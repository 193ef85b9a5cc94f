//! Markup labels: the dotted number wrapped in a `hnum` span.
//!
//! Widgets must be told not to escape these labels. The heading text itself is escaped so
//! that only the number span is interpreted as markup.

use crate::formats::{dotted, LabelFormat};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use scraper::{ElementRef, Html};

/// Class carried by the span wrapping the numeric path.
pub const NUMBER_CLASS: &str = "hnum";

/// Labels such as `<span class="hnum">2.3.1</span> Configuration`.
pub struct MarkupFormat;

impl LabelFormat for MarkupFormat {
    fn number(&self, path: &[usize]) -> String {
        format!("<span class=\"{NUMBER_CLASS}\">{}</span>", dotted(path))
    }

    fn auto_escape(&self) -> bool {
        false
    }

    fn label(&self, path: &[usize], text: &str) -> String {
        format!("{} {}", self.number(path), escape(text))
    }

    fn display(&self, label: &str) -> Line<'static> {
        let fragment = Html::parse_fragment(label);
        let number_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let spans: Vec<Span<'static>> = fragment
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let in_number = node.ancestors().filter_map(ElementRef::wrap).any(|el| {
                    el.value().classes().any(|class| class == NUMBER_CLASS)
                });
                let content = String::from(&**text);
                Some(if in_number {
                    Span::styled(content, number_style)
                } else {
                    Span::raw(content)
                })
            })
            .collect();

        Line::from(spans)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
