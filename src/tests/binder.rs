use super::{Activation, Host, NavTree, RenderOptions, ToolbarAction};
use crate::error::NavError;
use crate::formats::plain::PlainFormat;
use crate::outline::{extract_str, Outline};
use crate::widget::{ListWidget, TreeWidget, WidgetOptions};
use std::collections::HashMap;

#[derive(Default)]
struct RecordingHost {
    offsets: HashMap<String, usize>,
    scrolled_to: Option<usize>,
    fragment: Option<String>,
}

impl Host for RecordingHost {
    fn offset_of(&self, id: &str) -> Option<usize> {
        self.offsets.get(id).copied()
    }

    fn scroll_to(&mut self, offset: usize) {
        self.scrolled_to = Some(offset);
    }

    fn set_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
    }
}

fn outline() -> Outline {
    extract_str(
        r#"<body>
        <h1 id="a">A</h1>
        <h2 id="a1">A1</h2><h3 id="a1x">A1x</h3><h3 id="a1y">A1y</h3>
        <h2 id="a2">A2</h2>
        <h1 id="b">B</h1>
        <h2 id="b1">B1</h2><h3 id="b1x">B1x</h3>
        </body>"#,
        &PlainFormat,
    )
}

fn mount(activation: Activation) -> NavTree<ListWidget> {
    let options = RenderOptions {
        widget: WidgetOptions::default(),
        activation,
    };
    NavTree::mount(ListWidget::default(), &outline(), options)
}

fn open_states(nav: &NavTree<ListWidget>) -> Vec<(String, usize, bool)> {
    let tree = nav.widget().get_tree();
    let mut states = Vec::new();
    tree.walk(tree.root(), &mut |_, node| {
        states.push((node.id.clone(), node.level, node.is_open));
    });
    states
}

#[test]
fn test_parse_toolbar_controls() {
    assert_eq!(ToolbarAction::parse("nt-all"), Some(ToolbarAction::ExpandAll));
    assert_eq!(ToolbarAction::parse("nt-none"), Some(ToolbarAction::CollapseAll));
    assert_eq!(
        ToolbarAction::parse("nt-l2"),
        Some(ToolbarAction::ExpandToLevel(2))
    );
    assert_eq!(ToolbarAction::parse("nt-l"), None);
    assert_eq!(ToolbarAction::parse("nt-lx"), None);
    assert_eq!(ToolbarAction::parse("nt-select"), None);
    assert_eq!(ToolbarAction::parse("toolbar"), None);
}

#[test]
fn test_expand_to_level_reads_whole_numeric_suffix() {
    assert_eq!(
        ToolbarAction::parse("nt-l10"),
        Some(ToolbarAction::ExpandToLevel(10))
    );
    assert_eq!(
        ToolbarAction::parse("nt-l03"),
        Some(ToolbarAction::ExpandToLevel(3))
    );
    assert_eq!(ToolbarAction::parse("nt-l1x"), None);
    assert!(ToolbarAction::ExpandToLevel(10).opens(3));
}

#[test]
fn test_mount_loads_all_nodes() {
    let nav = mount(Activation::Scroll);
    assert_eq!(nav.activation(), Activation::Scroll);
    assert_eq!(nav.widget().get_tree().len(), outline().len());
    assert_eq!(nav.widget().get_tree().len(), 8);
}

#[test]
fn test_collapse_then_expand_all_opens_every_node() {
    let mut nav = mount(Activation::Scroll);

    assert_eq!(nav.handle_toolbar("nt-none"), Some(ToolbarAction::CollapseAll));
    assert!(open_states(&nav).iter().all(|(_, _, open)| !open));

    assert_eq!(nav.handle_toolbar("nt-all"), Some(ToolbarAction::ExpandAll));
    assert!(open_states(&nav).iter().all(|(_, _, open)| *open));
}

#[test]
fn test_expand_to_level_two_closes_level_three() {
    let mut nav = mount(Activation::Scroll);
    nav.handle_toolbar("nt-all");

    assert_eq!(
        nav.handle_toolbar("nt-l3"),
        Some(ToolbarAction::ExpandToLevel(3))
    );
    for (id, level, open) in open_states(&nav) {
        assert_eq!(open, level < 3, "{id}");
    }

    nav.handle_toolbar("nt-l2");
    for (id, level, open) in open_states(&nav) {
        assert_eq!(open, level < 2, "{id}");
    }
}

#[test]
fn test_unrecognised_control_changes_nothing() {
    let mut nav = mount(Activation::Scroll);
    nav.handle_toolbar("nt-l2");
    let before = open_states(&nav);

    assert_eq!(nav.handle_toolbar("nt-select"), None);
    assert_eq!(nav.handle_toolbar(""), None);
    assert_eq!(open_states(&nav), before);
}

#[test]
fn test_scroll_activation_scrolls_and_opens() {
    let mut nav = mount(Activation::Scroll);
    let mut host = RecordingHost::default();
    host.offsets.insert("a1".to_string(), 12);
    let a1 = nav.widget().get_tree().find_by_id("a1").unwrap();

    nav.click(a1, &mut host).unwrap();

    assert_eq!(host.scrolled_to, Some(12));
    assert_eq!(host.fragment, None);
    assert!(nav.widget().get_tree().node(a1).is_open);
}

#[test]
fn test_click_keeps_open_node_open() {
    let mut nav = mount(Activation::Fragment);
    let mut host = RecordingHost::default();
    let b = nav.widget().get_tree().find_by_id("b").unwrap();

    nav.click(b, &mut host).unwrap();
    nav.click(b, &mut host).unwrap();

    assert!(nav.widget().get_tree().node(b).is_open);
}

#[test]
fn test_scroll_activation_reports_missing_target() {
    let mut nav = mount(Activation::Scroll);
    let mut host = RecordingHost::default();
    let b = nav.widget().get_tree().find_by_id("b").unwrap();

    let result = nav.click(b, &mut host);

    assert_eq!(result, Err(NavError::MissingTarget("b".to_string())));
    assert_eq!(host.scrolled_to, None);
    assert!(!nav.widget().get_tree().node(b).is_open);
}

#[test]
fn test_fragment_activation_sets_fragment() {
    let mut nav = mount(Activation::Fragment);
    let mut host = RecordingHost::default();
    let b1x = nav.widget().get_tree().find_by_id("b1x").unwrap();

    nav.click(b1x, &mut host).unwrap();

    assert_eq!(host.fragment.as_deref(), Some("b1x"));
    assert_eq!(host.scrolled_to, None);
}

#[test]
fn test_outline_is_unchanged_by_interaction() {
    let outline = outline();
    let snapshot = outline.clone();
    let options = RenderOptions {
        widget: WidgetOptions::default(),
        activation: Activation::Fragment,
    };
    let mut nav = NavTree::mount(ListWidget::default(), &outline, options);
    nav.handle_toolbar("nt-all");
    nav.handle_toolbar("nt-none");

    assert_eq!(outline, snapshot);
}
