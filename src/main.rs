//! rulebook: read a markdown rulebook section by section, with search.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rulebook::app_state::{AppState, Control};
use rulebook::clipboard::SystemClipboard;
use rulebook::config::Config;
use rulebook::document::Document;
use rulebook::error::Result;
use rulebook::formats::markdown::MarkdownFormat;
use rulebook::location::Location;
use rulebook::search::SearchIndex;
use rulebook::ui;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Longest wait between wakeups, so finished clipboard writes are noticed promptly.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "rulebook")]
#[command(about = "Section navigation and search for markdown rulebooks", long_about = None)]
struct Args {
    /// Document to read, optionally followed by #section
    #[arg(value_name = "PATH[#SECTION]")]
    path: String,

    /// Section to open, overriding any #fragment in PATH
    #[arg(long, short = 's', value_name = "ID")]
    section: Option<String>,

    /// Configuration file (defaults to ./rulebook.toml when present)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file while the reader is open
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the results of one query as JSON and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Print the search index as JSON and exit
    #[arg(long)]
    dump_index: bool,
}

fn log_filter(verbose: u8) -> EnvFilter {
    if let Ok(env) = std::env::var("RULEBOOK_LOG") {
        return EnvFilter::new(env);
    }
    match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Logs go to `--log-file` when given. Without one, only the non-interactive modes log (to
/// stderr); the full-screen reader would be garbled by it.
fn init_tracing(args: &Args) -> Result<()> {
    let interactive = args.search.is_none() && !args.dump_index;
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(log_filter(args.verbose))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(log_filter(args.verbose))
            .with_writer(io::stderr)
            .without_time()
            .init();
    }
    Ok(())
}

fn base_url(cfg: &Config, path: &Path) -> String {
    if let Some(base) = &cfg.base_url {
        return base.clone();
    }
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let cfg = Config::load(args.config.as_deref())?;

    let (path, fragment) = Location::split(&args.path);
    let path = PathBuf::from(path);
    let fragment = args.section.clone().or(fragment);

    let format = MarkdownFormat;
    let document = Document::load(&path, &format, &cfg)?;
    tracing::info!(
        path = %path.display(),
        sections = document.sections.len(),
        "document loaded"
    );

    if args.dump_index || args.search.is_some() {
        let index = SearchIndex::build(&document.sections).with_limit(cfg.max_results);
        let json = match &args.search {
            Some(query) => serde_json::to_string_pretty(&index.search(query.trim()))?,
            None => serde_json::to_string_pretty(index.entries())?,
        };
        println!("{json}");
        return Ok(());
    }

    let location = Location::new(base_url(&cfg, &path), fragment);
    let app = AppState::new(document, location, &cfg, Arc::new(SystemClipboard));
    run_tui(app, &cfg)
}

fn run_tui(mut app: AppState, cfg: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
) -> Result<()> {
    app.handle_resize(terminal.size()?.width);

    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key, Instant::now()) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, _) => app.handle_resize(width),
                Event::FocusLost => app.handle_focus_lost(),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}
