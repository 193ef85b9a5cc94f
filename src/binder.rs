//! Binds an outline to a widget and reacts to clicks on the tree and on the toolbar.
//!
//! Mounting seeds the widget once. Afterwards the only state that changes is the widget's
//! open/closed state and whatever the [`Host`] does when a node is activated.
//!
//! Toolbar controls are recognised by identifier:
//!
//! ```text
//! nt-all     expand every node
//! nt-none    collapse every node
//! nt-l<N>    expand nodes above level N, collapse the rest
//! ```

use crate::error::NavError;
use crate::outline::Outline;
use crate::widget::{ClickEvent, NodeRef, TreeWidget, WidgetOptions};
use tracing::{debug, trace};

/// Identifier of the "expand all" toolbar control.
pub const EXPAND_ALL: &str = "nt-all";
/// Identifier of the "collapse all" toolbar control.
pub const COLLAPSE_ALL: &str = "nt-none";
/// Identifier prefix of the "expand to level" toolbar controls.
pub const EXPAND_TO_LEVEL_PREFIX: &str = "nt-l";

/// The page a navigation tree sits next to.
pub trait Host {
    /// Position of the element carrying the identifier, if there is one.
    fn offset_of(&self, id: &str) -> Option<usize>;

    /// Scrolls so that the given position is at the top of the viewport.
    fn scroll_to(&mut self, offset: usize);

    /// Sets the navigation fragment and lets the host resolve it.
    fn set_fragment(&mut self, id: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What activating a node does to the host.
pub enum Activation {
    /// Scroll the heading's element to the top of the viewport.
    Scroll,
    /// Set the navigation fragment to the heading's identifier.
    Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Everything needed to mount an outline.
pub struct RenderOptions {
    /// Passed to the widget on load.
    pub widget: WidgetOptions,
    /// Behaviour of node clicks.
    pub activation: Activation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Bulk policy applied to every node by a toolbar control.
pub enum ToolbarAction {
    /// Open every node.
    ExpandAll,
    /// Close every node.
    CollapseAll,
    /// Open nodes whose level is below the given one, close the others.
    ExpandToLevel(usize),
}

impl ToolbarAction {
    #[must_use]
    /// Recognises a toolbar control by identifier; unknown identifiers yield `None`.
    pub fn parse(control_id: &str) -> Option<Self> {
        match control_id {
            EXPAND_ALL => Some(Self::ExpandAll),
            COLLAPSE_ALL => Some(Self::CollapseAll),
            _ => {
                // The whole numeric suffix is the level, so `nt-l10` is level 10, not 1.
                let digits = control_id.strip_prefix(EXPAND_TO_LEVEL_PREFIX)?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok().map(Self::ExpandToLevel)
            }
        }
    }

    #[must_use]
    /// Whether a node at `level` ends up open under this policy.
    pub fn opens(self, level: usize) -> bool {
        match self {
            Self::ExpandAll => true,
            Self::CollapseAll => false,
            Self::ExpandToLevel(max) => level < max,
        }
    }
}

/// A widget seeded with an outline, plus the handlers wired to it.
pub struct NavTree<W> {
    widget: W,
    activation: Activation,
}

impl<W: TreeWidget> NavTree<W> {
    #[must_use]
    /// Loads the outline's top-level sections into the widget.
    pub fn mount(mut widget: W, outline: &Outline, options: RenderOptions) -> Self {
        widget.load(&outline.roots, &options.widget);
        debug!(
            sections = outline.roots.len(),
            nodes = outline.len(),
            activation = ?options.activation,
            "mounted navigation tree"
        );
        Self {
            widget,
            activation: options.activation,
        }
    }

    #[must_use]
    /// The bound widget.
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// The bound widget, for direct user interaction such as toggling.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    #[must_use]
    /// How node clicks reach the host.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Emits a click on `node`, handles it, then lets the widget finish the event.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::MissingTarget`] when scrolling to a heading the host does not have.
    pub fn click(&mut self, node: NodeRef, host: &mut impl Host) -> Result<(), NavError> {
        let mut event = self.widget.click(node);
        let handled = self.handle_click(&mut event, host);
        self.widget.finish_click(&event);
        handled
    }

    /// Reveals the clicked node's heading in the host and keeps the node open.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::MissingTarget`] when scrolling to a heading the host does not have.
    pub fn handle_click(
        &mut self,
        event: &mut ClickEvent,
        host: &mut impl Host,
    ) -> Result<(), NavError> {
        event.prevent_default();
        let id = self.widget.get_tree().node(event.node).id.clone();

        match self.activation {
            Activation::Scroll => {
                let offset = host
                    .offset_of(&id)
                    .ok_or_else(|| NavError::MissingTarget(id.clone()))?;
                host.scroll_to(offset);
            }
            Activation::Fragment => host.set_fragment(&id),
        }
        self.widget.open_node(event.node);
        trace!(%id, "activated node");
        Ok(())
    }

    /// Applies the bulk policy named by a toolbar control to every node.
    ///
    /// Returns the applied action, or `None` (and changes nothing) if the identifier is
    /// not a toolbar control.
    pub fn handle_toolbar(&mut self, control_id: &str) -> Option<ToolbarAction> {
        let Some(action) = ToolbarAction::parse(control_id) else {
            trace!(control_id, "ignoring click outside toolbar controls");
            return None;
        };

        let tree = self.widget.get_tree();
        let mut nodes = Vec::with_capacity(tree.len());
        tree.walk(tree.root(), &mut |node, data| nodes.push((node, data.level)));

        for (node, level) in nodes {
            if action.opens(level) {
                self.widget.open_node(node);
            } else {
                self.widget.close_node(node);
            }
        }
        debug!(?action, "applied toolbar action");
        Some(action)
    }
}

#[cfg(test)]
#[path = "tests/binder.rs"]
mod tests;
