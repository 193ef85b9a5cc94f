//! The state behind the interactive tree: a mounted navigation tree next to its page.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! navigates. Key presses are translated into the same events a browser would deliver to the
//! tree: node clicks, direct toggles, and clicks on toolbar controls identified by name.

use crate::binder::{NavTree, ToolbarAction, COLLAPSE_ALL, EXPAND_ALL};
use crate::config::Variant;
use crate::formats::LabelFormat;
use crate::outline::Outline;
use crate::page::Page;
use crate::widget::{ListWidget, TreeWidget};
use ratatui::crossterm::event::KeyCode;
use tracing::debug;

/// Toolbar controls as `(key, control id, caption)`.
pub const TOOLBAR: &[(char, &str, &str)] = &[
    ('a', EXPAND_ALL, "all"),
    ('n', COLLAPSE_ALL, "none"),
    ('1', "nt-l1", "L1"),
    ('2', "nt-l2", "L2"),
    ('3', "nt-l3", "L3"),
];

/// Lines scrolled by `PageUp` and `PageDown`.
const PAGE_STEP: isize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether the event loop should keep running.
pub enum Flow {
    /// Keep handling input.
    Continue,
    /// Leave the TUI.
    Quit,
}

/// Bridges the mounted tree, the page it navigates, and the status line.
pub struct AppState {
    /// Mounted navigation tree.
    pub nav: NavTree<ListWidget>,
    /// Page the tree navigates.
    pub page: Page,
    /// Label format used to display nodes.
    pub format: Box<dyn LabelFormat>,
    /// Active tree flavour.
    pub variant: Variant,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Toolbar control most recently applied.
    pub last_action: Option<ToolbarAction>,
    /// Number of headings left out of the outline, shown in the tree title.
    pub skipped: usize,
}

impl AppState {
    #[must_use]
    /// Mounts the outline in a fresh list widget for the given variant.
    pub fn new(outline: &Outline, page: Page, variant: Variant) -> Self {
        let nav = NavTree::mount(ListWidget::default(), outline, variant.render_options());
        Self {
            nav,
            page,
            format: variant.label_format(),
            variant,
            message: None,
            last_action: None,
            skipped: outline
                .diagnostics
                .iter()
                .filter(|d| d.is_left_out())
                .count(),
        }
    }

    /// Translates a key press into tree, toolbar, or page events.
    pub fn handle_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.nav.widget_mut().move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.nav.widget_mut().move_down(),
            KeyCode::Left | KeyCode::Char('h') => self.nav.widget_mut().collapse_or_parent(),
            KeyCode::Right | KeyCode::Char('l') => self.nav.widget_mut().expand_or_child(),
            KeyCode::Enter => self.activate_current(),
            KeyCode::PageUp => self.page.scroll_by(-PAGE_STEP),
            KeyCode::PageDown => self.page.scroll_by(PAGE_STEP),
            KeyCode::Char(c) => {
                if let Some((_, control_id, _)) = TOOLBAR.iter().find(|(key, _, _)| *key == c) {
                    self.click_toolbar(control_id);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Clicks the tree node under the cursor.
    pub fn activate_current(&mut self) {
        let Some(node) = self.nav.widget().cursor() else {
            return;
        };
        self.message = match self.nav.click(node, &mut self.page) {
            Ok(()) => self.page.fragment().map(|fragment| format!("#{fragment}")),
            Err(e) => Some(e.to_string()),
        };
    }

    /// Clicks the toolbar control with the given identifier.
    pub fn click_toolbar(&mut self, control_id: &str) {
        let action = self.nav.handle_toolbar(control_id);
        debug!(control_id, ?action, "toolbar click");
        if action.is_some() {
            self.last_action = action;
        }
    }

    #[must_use]
    /// Identifier of the node under the cursor.
    pub fn current_id(&self) -> Option<&str> {
        let node = self.nav.widget().cursor()?;
        Some(self.nav.widget().get_tree().node(node).id.as_str())
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
