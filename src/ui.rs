//! The UI renders the application state into something visible and clickable.
//!
//! The tree pane shows the mounted outline with box-drawing characters, the page pane shows
//! the document scrolled to the current offset, and the bottom bar carries the toolbar.

use crate::app_state::{AppState, TOOLBAR};
use crate::config::Config;
use crate::heading::Level;
use crate::widget::{NodeRef, Tree, TreeWidget};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the tree, the page, and the toolbar.
pub fn draw(f: &mut Frame, app: &AppState, cfg: &Config) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.tree_width), Constraint::Min(0)])
        .split(rows[0]);

    draw_tree(f, app, panes[0]);
    draw_page(f, app, panes[1]);
    draw_toolbar(f, app, rows[1]);
}

/// Generate box-drawing prefix for tree structure
fn get_tree_prefix(level: usize, is_last: bool, parent_states: &[bool]) -> String {
    if level == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    // Draw vertical lines for parent levels
    for i in 0..level.saturating_sub(1) {
        if i < parent_states.len() && parent_states[i] {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

fn is_last_child(tree: &Tree, node: NodeRef) -> bool {
    tree.node(node)
        .parent
        .is_none_or(|parent| tree.node(parent).children.last() == Some(&node))
}

/// Prefix for a row, from whether each of its ancestors below the top level has siblings after it.
fn row_prefix(tree: &Tree, node: NodeRef) -> String {
    let mut parent_states = Vec::new();
    let mut current = tree.node(node).parent;
    while let Some(ancestor) = current {
        if tree.node(ancestor).level >= 2 {
            parent_states.push(!is_last_child(tree, ancestor));
        }
        current = tree.node(ancestor).parent;
    }
    parent_states.reverse();

    let tree_level = tree.node(node).level.saturating_sub(1);
    get_tree_prefix(tree_level, is_last_child(tree, node), &parent_states)
}

fn draw_tree(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let widget = app.nav.widget();
    let tree = widget.get_tree();
    let auto_escape = widget.options().auto_escape;

    let items: Vec<ListItem> = tree
        .visible()
        .into_iter()
        .map(|node| {
            let data = tree.node(node);
            let marker = match (data.children.is_empty(), data.is_open) {
                (true, _) => "  ",
                (false, true) => "▾ ",
                (false, false) => "▸ ",
            };

            let mut spans = vec![
                Span::styled(row_prefix(tree, node), Style::default().fg(Color::DarkGray)),
                Span::raw(marker),
            ];
            let mut label = if auto_escape {
                Line::raw(data.label.clone())
            } else {
                app.format.display(&data.label)
            };
            spans.append(&mut label.spans);

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.skipped == 0 {
        format!("Contents ({} headings)", tree.len())
    } else {
        format!("Contents ({} headings, {} skipped)", tree.len(), app.skipped)
    };
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if let Some(id) = app.current_id() {
        block = block.title_bottom(format!("#{id}"));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(widget.cursor_row());
    f.render_stateful_widget(list, area, &mut state);
}

fn heading_style(level: Level) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        Level::Section => style.fg(Color::Cyan),
        Level::Subsection => style.fg(Color::Blue),
        Level::Subsubsection => style,
    }
}

fn draw_page(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let lines: Vec<Line> = app
        .page
        .lines
        .iter()
        .skip(app.page.offset())
        .map(|line| match line.heading {
            Some(level) => Line::styled(line.text.clone(), heading_style(level)),
            None => Line::raw(line.text.clone()),
        })
        .collect();

    let title = match app.page.fragment() {
        Some(fragment) => format!("Page #{fragment}"),
        None => "Page".to_string(),
    };

    let page = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(page, area);
}

fn draw_toolbar(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let mut spans = Vec::new();
    for (key, control_id, caption) in TOOLBAR {
        spans.push(Span::styled(
            format!("[{key}] {caption}"),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {control_id}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let help = match &app.message {
        Some(message) => message.clone(),
        None => "↑/↓: Navigate | ←/→: Collapse/Expand | Enter: Go | PgUp/PgDn: Scroll | q: Quit"
            .to_string(),
    };
    spans.push(Span::raw(help));

    let title = match app.last_action {
        Some(action) => format!("Toolbar ({:?}, last: {action:?})", app.variant),
        None => format!("Toolbar ({:?})", app.variant),
    };
    let toolbar =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(toolbar, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
