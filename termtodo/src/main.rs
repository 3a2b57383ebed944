//! `termtodo`: terminal to-do list with local persistence.
//!
//! Tasks are kept in `<data-dir>/<storage-key>.json` and rewritten after
//! every change. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! cargo run --bin termtodo
//!
//! # Keep a separate list, refuse to start on a corrupt file
//! cargo run --bin termtodo -- --storage-key work --strict-load
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::App;
use termtodo::config::{self, AppConfig, CliArgs};
use termtodo::store::FileStore;
use termtodo::tasks::TaskListController;
use termtodo::ui;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // A bad config file is skipped; CLI and env values still apply.
    let (config, config_err) = AppConfig::load_or_cli_only(&cli);
    if let Some(e) = &config_err {
        eprintln!("Warning: failed to load config file: {e}");
    }

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    if let Some(e) = &config_err {
        tracing::warn!(error = %e, "config file ignored");
    }
    tracing::info!(data_dir = %config.data_dir.display(), key = %config.storage_key, "termtodo starting");

    // Open the task list before taking over the terminal so a strict-load
    // failure is reported on a normal screen.
    let store = FileStore::new(&config.data_dir);
    let (controller, sync_status) = if config.strict_load {
        TaskListController::open_strict(store, &config.storage_key).map_err(|e| {
            eprintln!("Error: {e}");
            io::Error::other(e)
        })?
    } else {
        TaskListController::open(store, &config.storage_key)
    };
    let mut app = App::new(controller, sync_status).with_placeholder(config.placeholder.clone());

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!(tasks = app.tasks().len(), "termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(config::log_filter(level))
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop: draw, then wait for one input event.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(config.poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
