//! ACH contract TUI - beneficial owners step of the bank account setup
//!
//! A Ratatui-based TUI that collects beneficial owner details and the
//! required agreements, keeps a draft on disk, and queues the finished step
//! for the bank account backend.

mod app;
mod bank_accounts;
mod config;
mod controller;
mod draft;
mod platform;
mod state;
mod ui;
mod validation;

use anyhow::{Context, Result};
use app::App;
use bank_accounts::OutboxClient;
use config::TuiConfig;
use controller::ContractStep;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use draft::JsonFileDraftStore;
use ratatui::{backend::CrosstermBackend, Terminal};
use state::ExitReason;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TuiConfig::load_or_create().context("Failed to load configuration")?;
    let paths = config.paths();
    init_logging(&paths.log);

    let store = JsonFileDraftStore::new(&paths.draft);
    let api = OutboxClient::new(&paths.outbox);
    tracing::info!(
        draft = %store.path().display(),
        outbox = %api.dir().display(),
        "starting contract step"
    );
    let contract = ContractStep::new(Box::new(store));
    let mut app = App::new(contract, Box::new(api), config.company_name());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting after error: {err:#}");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    match app.exit_reason() {
        Some(ExitReason::Submitted) => {
            println!(
                "Beneficial owner details submitted. Request queued in {}",
                paths.outbox.display()
            );
        }
        Some(ExitReason::GoToStep(step)) => {
            println!(
                "Returning to step {} of {}: {}. Your draft was saved.",
                step.number(),
                state::BankAccountStep::total(),
                step.label()
            );
        }
        Some(ExitReason::DismissModal) | None => {
            println!("Draft saved to {}", paths.draft.display());
        }
    }

    Ok(())
}

/// Log to a file so output does not draw over the alternate screen
fn init_logging(log_path: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ach_contract_tui=info".into());

    let file = log_path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| OpenOptions::new().create(true).append(true).open(log_path));

    match file {
        Ok(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        Err(_) => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Ignore release events reported by some terminals
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.state.exit = Some(ExitReason::DismissModal);
                    return Ok(());
                }
                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
