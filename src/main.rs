//! navtree: collapsible heading navigation for generated HTML documentation.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use navtree::{app_state, config, error::Result, outline, page, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scraper::Html;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "navtree")]
#[command(about = "Collapsible heading navigation for generated HTML documentation", long_about = None)]
struct Args {
    /// Rendered HTML page to navigate
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Tree flavour, overriding navtree.toml
    #[arg(long, value_enum)]
    variant: Option<config::Variant>,

    /// Print the widget data as JSON and exit
    #[arg(long, conflicts_with = "check")]
    json: bool,

    /// Report headings that cannot be navigated to; fails if there are any
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    init_logging();
    match run(&Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NAVTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let cfg = config::Config::load();
    let variant = match args.variant {
        Some(variant) => variant,
        None => cfg.variant()?,
    };

    let html = std::fs::read_to_string(&args.path)?;
    let document = Html::parse_document(&html);
    let format = variant.label_format();
    let outline = outline::extract(&document, format.as_ref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outline.roots)?);
        return Ok(ExitCode::SUCCESS);
    }

    if args.check {
        for diagnostic in &outline.diagnostics {
            println!("{}: {diagnostic}", args.path.display());
        }
        return Ok(if outline.diagnostics.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if outline.is_empty() {
        eprintln!("No identified h1 headings found in {}", args.path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let state = app_state::AppState::new(&outline, page::Page::from_html(&document), variant);
    run_tui(state, &cfg)?;
    Ok(ExitCode::SUCCESS)
}

fn run_tui(mut app: app_state::AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) == app_state::Flow::Quit {
                return Ok(());
            }
        }
    }
}
