//! dynform - Schema-driven Forms in the Terminal
//!
//! Presents one form per registered form type, shows completion progress,
//! validates required fields on submit and keeps the submitted records in a
//! table where they can be edited or deleted.

use std::io;
use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use dynform::application::{App, AppMode};
use dynform::config::Config;
use dynform::infrastructure::init_logging;
use dynform::presentation::{render_ui, InputHandler};

/// Entry point for the dynform terminal application.
///
/// Reads the configuration, loads the schema registry before touching the
/// terminal so configuration errors print normally, then runs the event loop
/// until the user quits.
fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;

    let registry = config.load_registry().context("cannot load form schemas")?;
    let form_type = config.initial_form_type(&registry);
    let mut app = App::new(registry, &form_type)?.with_export_filename(&config.export_file);
    log::info!("starting with form type {}", app.schema.key);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("event loop failed: {}", err);
        println!("{err:?}");
    }
    log::info!("exiting with {} submitted entries", app.ledger.len());

    Ok(())
}

/// Main application event loop.
///
/// Redraws after every key press so each operation's result is visible on
/// the next frame. Continues until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
