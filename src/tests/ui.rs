use super::{draw, get_tree_prefix};
use crate::app_state::AppState;
use crate::config::{Config, Variant};
use crate::outline::extract;
use crate::page::Page;
use ratatui::{backend::TestBackend, Terminal};
use scraper::Html;

const DOC: &str = r#"<body>
<h1 id="intro">Intro</h1><p>Welcome.</p>
<h2 id="setup">Setup</h2><h3 id="linux">Linux</h3>
<h2 id="tips">Tips</h2>
<h1 id="usage">Usage</h1>
<h3 id="stray">Stray</h3>
</body>"#;

fn render(variant: Variant) -> String {
    render_doc(DOC, variant)
}

fn render_doc(doc: &str, variant: Variant) -> String {
    let document = Html::parse_document(doc);
    let outline = extract(&document, variant.label_format().as_ref());
    let app = AppState::new(&outline, Page::from_html(&document), variant);

    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal
        .draw(|f| draw(f, &app, &Config::default()))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_tree_prefix() {
    assert_eq!(get_tree_prefix(0, false, &[]), "");
    assert_eq!(get_tree_prefix(1, false, &[]), "├── ");
    assert_eq!(get_tree_prefix(2, true, &[true]), "│   └── ");
    assert_eq!(get_tree_prefix(2, true, &[false]), "    └── ");
}

#[test]
fn test_scroll_variant_shows_collapsed_sections() {
    let screen = render(Variant::Scroll);
    assert!(screen.contains("Contents (5 headings, 1 skipped)"), "{screen}");
    assert!(screen.contains("▸ 1 Intro"), "{screen}");
    assert!(screen.contains("  2 Usage"), "{screen}");
    assert!(!screen.contains("1.1 Setup"), "{screen}");
    assert!(screen.contains("nt-all"), "{screen}");
    assert!(screen.contains("#intro"), "{screen}");
}

#[test]
fn test_duplicate_ids_are_not_counted_as_skipped() {
    let screen = render_doc(
        r#"<body><h1 id="a">A</h1><h1 id="a">Again</h1></body>"#,
        Variant::Scroll,
    );
    assert!(screen.contains("Contents (2 headings)"), "{screen}");
    assert!(!screen.contains("skipped"), "{screen}");
}

#[test]
fn test_fragment_variant_renders_markup_labels() {
    let screen = render(Variant::Fragment);
    assert!(screen.contains("▾ 1 Intro"), "{screen}");
    assert!(screen.contains("├── ▾ 1.1 Setup"), "{screen}");
    assert!(screen.contains("│   └──   1.1.1 Linux"), "{screen}");
    assert!(screen.contains("└──   1.2 Tips"), "{screen}");
    assert!(!screen.contains("hnum"), "{screen}");
}
