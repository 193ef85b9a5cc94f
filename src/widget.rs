//! The hierarchical list widget that displays an outline.
//!
//! Binding code only talks to widgets through the narrow [`TreeWidget`] trait: load data, read
//! the live tree, open or close a node, and emit click events. [`ListWidget`] is the in-memory
//! implementation behind the terminal UI; it adds a cursor over the visible rows.
//!
//! Open/closed state belongs to the widget. The outline it was loaded from is never touched.

use crate::heading::HeadingNode;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle to a node of a [`Tree`], valid for the tree that issued it.
pub struct NodeRef(usize);

#[derive(Clone, Debug)]
/// A node of the widget's live tree.
pub struct TreeNode {
    /// Label as given in the widget data.
    pub label: String,
    /// Identifier as given in the widget data; empty for the root.
    pub id: String,
    /// Outline level, 0 for the root.
    pub level: usize,
    /// Containing node, `None` only for the root.
    pub parent: Option<NodeRef>,
    /// Nested nodes in data order.
    pub children: Vec<NodeRef>,
    /// Whether the node is expanded.
    pub is_open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Initialisation settings for a widget.
pub struct WidgetOptions {
    /// Show labels verbatim rather than interpreting their markup.
    pub auto_escape: bool,
    /// Expand every node whose level is at most this value when data is loaded.
    pub auto_open: Option<usize>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            auto_escape: true,
            auto_open: None,
        }
    }
}

#[derive(Clone, Debug)]
/// Arena holding a widget's nodes under a virtual root.
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    #[must_use]
    /// Builds the live tree for the given widget data.
    pub fn from_data(data: &[HeadingNode], options: &WidgetOptions) -> Self {
        let mut tree = Self {
            nodes: vec![TreeNode {
                label: String::new(),
                id: String::new(),
                level: 0,
                parent: None,
                children: Vec::new(),
                is_open: true,
            }],
        };
        for heading in data {
            tree.insert(tree.root(), heading, options);
        }
        tree
    }

    fn insert(&mut self, parent: NodeRef, heading: &HeadingNode, options: &WidgetOptions) {
        let level = heading.level.depth();
        let node = NodeRef(self.nodes.len());
        self.nodes.push(TreeNode {
            label: heading.label.clone(),
            id: heading.id.clone(),
            level,
            parent: Some(parent),
            children: Vec::new(),
            is_open: options.auto_open.is_some_and(|max| level <= max),
        });
        self.nodes[parent.0].children.push(node);

        for child in &heading.children {
            self.insert(node, child, options);
        }
    }

    #[must_use]
    /// The virtual root; its children are the top-level nodes.
    pub fn root(&self) -> NodeRef {
        NodeRef(0)
    }

    #[must_use]
    /// Looks up a node by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different tree.
    pub fn node(&self, node: NodeRef) -> &TreeNode {
        &self.nodes[node.0]
    }

    #[must_use]
    /// Number of nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[must_use]
    /// Whether the tree holds no nodes besides the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every descendant of `from` depth first, parents before children.
    pub fn walk(&self, from: NodeRef, f: &mut impl FnMut(NodeRef, &TreeNode)) {
        for &child in &self.node(from).children {
            f(child, self.node(child));
            self.walk(child, f);
        }
    }

    #[cfg(test)]
    /// First node, in data order, carrying the given identifier.
    pub(crate) fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        (1..self.nodes.len())
            .map(NodeRef)
            .find(|node| self.node(*node).id == id)
    }

    #[must_use]
    /// Whether every ancestor of the node is open.
    pub fn is_visible(&self, node: NodeRef) -> bool {
        let mut current = self.node(node).parent;
        while let Some(ancestor) = current {
            if ancestor != self.root() && !self.node(ancestor).is_open {
                return false;
            }
            current = self.node(ancestor).parent;
        }
        true
    }

    #[must_use]
    /// Nodes that would be shown as rows, in display order.
    pub fn visible(&self) -> Vec<NodeRef> {
        let mut rows = Vec::new();
        self.collect_visible(self.root(), &mut rows);
        rows
    }

    fn collect_visible(&self, from: NodeRef, rows: &mut Vec<NodeRef>) {
        for &child in &self.node(from).children {
            rows.push(child);
            if self.node(child).is_open {
                self.collect_visible(child, rows);
            }
        }
    }

    fn nearest_visible(&self, node: NodeRef) -> NodeRef {
        let mut current = node;
        while !self.is_visible(current) {
            match self.node(current).parent {
                Some(parent) if parent != self.root() => current = parent,
                _ => break,
            }
        }
        current
    }

    fn set_open(&mut self, node: NodeRef, open: bool) {
        if node != self.root() {
            self.nodes[node.0].is_open = open;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A node activation emitted by a widget.
pub struct ClickEvent {
    /// The activated node.
    pub node: NodeRef,
    default_prevented: bool,
}

impl ClickEvent {
    #[must_use]
    /// A fresh event for the given node.
    pub fn new(node: NodeRef) -> Self {
        Self {
            node,
            default_prevented: false,
        }
    }

    /// Stops the widget from running its own activation behaviour.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    /// Whether a handler took over the activation.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Capabilities a hierarchical list widget must offer to be bound to an outline.
pub trait TreeWidget {
    /// Replaces the widget's contents with the given data.
    fn load(&mut self, data: &[HeadingNode], options: &WidgetOptions);

    /// The live tree, rooted at a virtual node whose children are the top-level entries.
    fn get_tree(&self) -> &Tree;

    /// Expands a node.
    fn open_node(&mut self, node: NodeRef);

    /// Collapses a node.
    fn close_node(&mut self, node: NodeRef);

    /// Emits a click event for a node, to be passed through handlers before
    /// [`finish_click`](TreeWidget::finish_click).
    fn click(&self, node: NodeRef) -> ClickEvent {
        ClickEvent::new(node)
    }

    /// Runs the default activation, toggling the node, unless a handler prevented it.
    fn finish_click(&mut self, event: &ClickEvent) {
        if event.is_default_prevented() {
            return;
        }
        if self.get_tree().node(event.node).is_open {
            self.close_node(event.node);
        } else {
            self.open_node(event.node);
        }
    }
}

#[derive(Clone, Debug)]
/// In-memory list widget with a cursor over its visible rows.
pub struct ListWidget {
    tree: Tree,
    options: WidgetOptions,
    cursor: Option<NodeRef>,
}

impl Default for ListWidget {
    fn default() -> Self {
        let options = WidgetOptions::default();
        Self {
            tree: Tree::from_data(&[], &options),
            options,
            cursor: None,
        }
    }
}

impl TreeWidget for ListWidget {
    fn load(&mut self, data: &[HeadingNode], options: &WidgetOptions) {
        self.tree = Tree::from_data(data, options);
        self.options = *options;
        self.cursor = self.tree.visible().first().copied();
        trace!(nodes = self.tree.len(), "widget loaded");
    }

    fn get_tree(&self) -> &Tree {
        &self.tree
    }

    fn open_node(&mut self, node: NodeRef) {
        self.tree.set_open(node, true);
    }

    fn close_node(&mut self, node: NodeRef) {
        self.tree.set_open(node, false);
        self.cursor = self.cursor.map(|cursor| self.tree.nearest_visible(cursor));
    }
}

impl ListWidget {
    #[must_use]
    /// Options the widget was last loaded with.
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    #[must_use]
    /// Node under the cursor, if the tree is not empty.
    pub fn cursor(&self) -> Option<NodeRef> {
        self.cursor
    }

    #[must_use]
    /// Row index of the cursor among the visible rows.
    pub fn cursor_row(&self) -> Option<usize> {
        let cursor = self.cursor?;
        self.tree.visible().iter().position(|row| *row == cursor)
    }

    /// Moves the cursor to the previous visible row.
    pub fn move_up(&mut self) {
        let rows = self.tree.visible();
        if let Some(row) = self.cursor_row() {
            if row > 0 {
                self.cursor = Some(rows[row - 1]);
            }
        }
    }

    /// Moves the cursor to the next visible row.
    pub fn move_down(&mut self) {
        let rows = self.tree.visible();
        if let Some(row) = self.cursor_row() {
            if row + 1 < rows.len() {
                self.cursor = Some(rows[row + 1]);
            }
        }
    }

    /// Collapses the cursor node, or moves to its parent if there is nothing to collapse.
    pub fn collapse_or_parent(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let node = self.tree.node(cursor);
        if node.is_open && !node.children.is_empty() {
            self.close_node(cursor);
        } else if let Some(parent) = node.parent.filter(|p| *p != self.tree.root()) {
            self.cursor = Some(parent);
        }
    }

    /// Expands the cursor node, or moves to its first child if it is already open.
    pub fn expand_or_child(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let node = self.tree.node(cursor);
        if node.children.is_empty() {
            return;
        }
        if node.is_open {
            self.cursor = node.children.first().copied();
        } else {
            self.open_node(cursor);
        }
    }
}

#[cfg(test)]
#[path = "tests/widget.rs"]
mod tests;
