//! ordex TUI entry point.

use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ordex_tui::api_client::ApiClient;
use ordex_tui::config::TuiConfig;
use ordex_tui::error::TuiError;
use ordex_tui::events::TuiEvent;
use ordex_tui::interaction::HeaderLayout;
use ordex_tui::keys::map_key;
use ordex_tui::notifications::NotificationLevel;
use ordex_tui::persistence;
use ordex_tui::query;
use ordex_tui::state::{App, FetchJob};
use ordex_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let (config, config_error) = match TuiConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (TuiConfig::offline_defaults(), Some(err.to_string())),
    };
    init_logging(&config.log_path)?;

    let api = if config_error.is_none() {
        match ApiClient::new(&config) {
            Ok(api) => Some(api),
            Err(err) => {
                tracing::error!(error = %err, "failed to build API client");
                None
            }
        }
    } else {
        None
    };

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(config, api, today);
    if let Some(reason) = config_error {
        tracing::error!(error = %reason, "running without a remote");
        app.config_error = Some(reason.clone());
        app.notify(NotificationLevel::Error, reason);
    }

    match persistence::load(&app.config.prefs_path) {
        Ok(Some(prefs)) => app.registry.load(&prefs),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "column preferences unreadable, using defaults");
            app.notify(
                NotificationLevel::Warning,
                "Preferências de colunas ilegíveis, usando o padrão.",
            );
        }
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        let mut header_layout = HeaderLayout::default();
        terminal.draw(|f| header_layout = render_view(f, &app))?;
        app.header_layout = header_layout;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                handle_event(&mut app, event, today);
            }
        }

        if let Some(job) = app.take_fetch_job() {
            spawn_fetch(job, event_tx.clone());
        }
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_event(app: &mut App, event: TuiEvent, today: NaiveDate) {
    match event {
        TuiEvent::Input(key) => {
            if let Some(intent) = map_key(app.mode, key) {
                app.apply(intent, today);
            }
        }
        TuiEvent::Mouse(mouse) => app.handle_mouse(mouse, today),
        TuiEvent::FetchFinished { seq, outcome } => app.finish_fetch(seq, outcome),
        TuiEvent::Resize { .. } => {}
    }
}

fn spawn_fetch(job: FetchJob, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let outcome = query::fetch_orders(&job.api, &job.filter, &job.registry).await;
        let _ = sender
            .send(TuiEvent::FetchFinished {
                seq: job.seq,
                outcome,
            })
            .await;
    });
}

fn init_logging(path: &Path) -> Result<(), TuiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_env("ORDEX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Mouse(mouse) => {
                        let _ = sender.blocking_send(TuiEvent::Mouse(mouse));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}
