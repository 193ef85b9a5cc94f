use super::{AppState, Flow};
use crate::config::Variant;
use crate::outline::extract;
use crate::page::Page;
use crate::widget::TreeWidget;
use ratatui::crossterm::event::KeyCode;
use scraper::Html;

const DOC: &str = r#"<body>
<h1 id="intro">Intro</h1><p>Welcome.</p>
<h2 id="setup">Setup</h2><p>Install it.</p>
<h3 id="linux">Linux</h3><p>apt.</p>
<h1 id="usage">Usage</h1><p>Run it.</p>
</body>"#;

fn app(variant: Variant) -> AppState {
    let document = Html::parse_document(DOC);
    let outline = extract(&document, variant.label_format().as_ref());
    AppState::new(&outline, Page::from_html(&document), variant)
}

fn open_ids(app: &AppState) -> Vec<String> {
    let tree = app.nav.widget().get_tree();
    let mut ids = Vec::new();
    tree.walk(tree.root(), &mut |_, node| {
        if node.is_open {
            ids.push(node.id.clone());
        }
    });
    ids
}

#[test]
fn test_enter_scrolls_page_to_heading() {
    let mut app = app(Variant::Scroll);
    app.handle_key(KeyCode::Down);
    assert_eq!(app.current_id(), Some("usage"));

    app.handle_key(KeyCode::Enter);
    assert_eq!(app.page.offset(), 12);
    assert_eq!(app.message, None);
}

#[test]
fn test_enter_sets_fragment_in_fragment_variant() {
    let mut app = app(Variant::Fragment);
    app.handle_key(KeyCode::Down);
    app.handle_key(KeyCode::Down);
    assert_eq!(app.current_id(), Some("linux"));

    app.handle_key(KeyCode::Enter);
    assert_eq!(app.page.fragment(), Some("linux"));
    assert_eq!(app.page.offset(), 8);
    assert_eq!(app.message.as_deref(), Some("#linux"));
}

#[test]
fn test_fragment_variant_starts_two_levels_open() {
    let app = app(Variant::Fragment);
    assert_eq!(open_ids(&app), vec!["intro", "setup", "usage"]);
}

#[test]
fn test_toolbar_keys_apply_bulk_actions() {
    let mut app = app(Variant::Scroll);

    app.handle_key(KeyCode::Char('a'));
    assert_eq!(open_ids(&app).len(), 4);

    app.handle_key(KeyCode::Char('2'));
    assert_eq!(open_ids(&app), vec!["intro", "usage"]);

    app.handle_key(KeyCode::Char('n'));
    assert!(open_ids(&app).is_empty());

    app.handle_key(KeyCode::Char('x'));
    assert!(open_ids(&app).is_empty());
}

#[test]
fn test_quit_keys() {
    let mut app = app(Variant::Scroll);
    assert_eq!(app.handle_key(KeyCode::Char('j')), Flow::Continue);
    assert_eq!(app.handle_key(KeyCode::Char('q')), Flow::Quit);
}

#[test]
fn test_last_action_ignores_unknown_controls() {
    let mut app = app(Variant::Scroll);
    app.click_toolbar("nt-l1");
    app.click_toolbar("nt-select");
    assert_eq!(
        app.last_action,
        Some(crate::binder::ToolbarAction::ExpandToLevel(1))
    );
}
