//! Main entry point for the beyond-consent terminal site.

use beyond_consent::cards::{CardRenderer, format_grid};
use beyond_consent::catalog::Catalog;
use beyond_consent::config::{Config, open_log_file};
use beyond_consent::filter::FilterEngine;
use beyond_consent::forms::{SystemClipboard, share_episode};
use beyond_consent::tui::{Action, App, draw, poll_event};
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// Command-line arguments for the beyond-consent application.
#[derive(Parser, Debug)]
#[command(
    name = "beyond-consent",
    version,
    about = "The Beyond Consent podcast site in your terminal",
    long_about = "Browse, search and filter Beyond Consent episodes, follow a simulated player, \
                  and try the contact forms, all without leaving the terminal."
)]
struct Args {
    /// Initial search term
    #[arg(short, long)]
    search: Option<String>,

    /// Initial category: all, legal-advice, survivor-stories, prevention, digital-harassment
    #[arg(short, long)]
    category: Option<String>,

    /// Episodes revealed per "load more" (overrides config)
    #[arg(long)]
    page_size: Option<usize>,

    /// Press "load more" this many times before showing the list
    #[arg(long, default_value_t = 0)]
    load_more: u32,

    /// Print the filtered episode list and exit instead of starting the TUI
    #[arg(long)]
    list: bool,

    /// With --list, print JSON instead of text
    #[arg(long, requires = "list")]
    json: bool,

    /// Write a default config file if none exists and print its path
    #[arg(long)]
    init_config: bool,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Non-interactive mode: apply the filters from the command line and print.
fn print_list(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = FilterEngine::new(Catalog::seeded(), config.page_size, CardRenderer::new());

    if let Some(term) = &args.search {
        engine.set_search_term(term);
    }
    if let Some(category) = &args.category {
        engine.set_category(category);
    }
    for _ in 0..args.load_more {
        engine.load_more();
    }
    engine.refresh();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.view())?);
    } else {
        print!("{}", format_grid(engine.renderer().grid()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);

    // stderr would draw over the alternate screen
    let tui_mode = !(args.list || args.init_config);
    if tui_mode {
        match Config::get_log_path().and_then(|path| open_log_file(&path)) {
            Ok(file) => {
                logger.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                logger.filter_level(log::LevelFilter::Off);
            }
        }
    }

    logger.init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Load config
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    if args.list {
        return print_list(&args, &config);
    }

    let mut app = App::new(&config, Catalog::seeded());

    if let Some(term) = &args.search {
        app.search_input = term.clone();
        app.engine.set_search_term(term);
    }
    if let Some(category) = &args.category {
        app.engine.set_category(category);
    }
    for _ in 0..args.load_more {
        app.engine.load_more();
    }
    if args.search.is_some() || args.category.is_some() || args.load_more > 0 {
        app.show_page(beyond_consent::router::Page::Episodes);
    }

    info!("Starting with page size {}", config.page_size);

    // Initialize terminal
    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    restore_terminal()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut clipboard = SystemClipboard;

    loop {
        // Draw UI
        terminal.draw(|f| draw(f, app))?;

        // Poll for events
        if let Some(event) = poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => match app.handle_input(key) {
                    Action::Quit => break,
                    Action::Share(id) => {
                        if let Some(notification) = share_episode(&mut clipboard, &app.share_url, id)
                        {
                            app.notify(notification);
                        }
                    }
                    Action::None => {}
                },
                Event::Resize(width, _) => app.on_resize(width),
                _ => {}
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
