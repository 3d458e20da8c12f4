// ABOUTME: Main entry point for the signup wizard with TUI and CLI support
//
// Binary: signup
// Usage: signup [COMMAND]
// - No command: launches TUI
// - status: show saved progress
// - validate: check one step of saved data
// - submit: submit saved data
// - reset: discard saved progress

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, prelude::*};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};
use tracing::{debug, error, info, warn};

use signup_wizard::app::{App, EventHandler};
use signup_wizard::cli::{self, Commands};
use signup_wizard::components::LayoutComponent;
use signup_wizard::config::AppConfig;
use signup_wizard::services::{AppServices, StorageMode};

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }
    };
    let mode = if args.ephemeral {
        StorageMode::Ephemeral
    } else {
        StorageMode::Configured
    };
    let mut services = AppServices::init(&config, mode)?;

    let result = match args.command {
        Some(Commands::Status) => cli::status::execute(&services, args.format).await,
        Some(Commands::Validate(validate_args)) => {
            cli::submit::validate(validate_args, &services, args.format).await
        }
        Some(Commands::Submit) => cli::submit::execute(&mut services, args.format).await,
        Some(Commands::Reset(reset_args)) => cli::status::reset(reset_args, &mut services).await,

        // TUI mode (explicit or default)
        Some(Commands::Tui) | None => {
            let tick_rate = config.ui.tick_rate();
            let mut app = App::new(services, config);
            app.init();
            let mut layout = LayoutComponent::new();

            // Flush pending terminal events so stray keypresses don't land in the form
            while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = event::read();
            }

            run_tui(&mut app, &mut layout, tick_rate).await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent, tick_rate: Duration) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Use the status, validate, submit or reset commands for scripted use."
        ));
    }

    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, layout, &mut terminal, tick_rate).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    // Ignore keys for the first 100ms so buffered input cannot trigger actions
    let startup_time = Instant::now();
    const STARTUP_GUARD_MS: u64 = 100;

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if startup_time.elapsed() < Duration::from_millis(STARTUP_GUARD_MS) {
                    debug!(
                        "Ignoring key event {:?} during startup guard period",
                        key_event.code
                    );
                    continue;
                }
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                    EventHandler::process_event(app_event, &mut app.state);
                }

                // Start queued work right away instead of waiting for the next tick
                if app.state.pending_async_action.is_some() {
                    app.tick();
                    last_tick = Instant::now();
                }
            }
        }

        // Yield so spawned submissions and dialog timers make progress
        tokio::task::yield_now().await;

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            info!("Exiting signup wizard");
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".signup-wizard").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from(".signup-wizard/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "signup-wizard-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signup_wizard=info,signup=info".into());

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(file)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
        // The terminal belongs to the TUI, so without a log file logs are dropped
        Err(_) => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .with(filter)
            .init(),
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
