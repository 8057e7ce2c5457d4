//! hubgrid - browse and search public GitHub user profiles
//!
//! A terminal UI application that fetches the public user listing from the
//! GitHub API, caches it on disk for a short duration, and filters it live
//! as a search term is typed.

mod app;
mod cache;
mod cli;
mod data;
mod refresh;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cache::CacheManager;
use cli::{Cli, StartupConfig};
use data::UsersClient;
use refresh::{RefreshConfig, RefreshHandle};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Error(detail) => {
            render_error(frame, detail);
        }
        AppState::UserGrid => {
            ui::render_user_grid(frame, app);
        }
    }
}

/// Renders a loading message while the first fetch is in flight
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading users...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders the error banner in place of the grid
fn render_error(frame: &mut ratatui::Frame, detail: &str) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Modifier, Style},
        text::Line,
        widgets::Paragraph,
    };

    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Percentage(40),
        ])
        .split(area);

    let lines = vec![
        Line::styled(
            app::FETCH_ERROR_MESSAGE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(detail.to_string(), Style::default().fg(Color::DarkGray)),
        Line::styled("r retry \u{b7} q quit", Style::default().fg(Color::DarkGray)),
    ];
    let banner = Paragraph::new(lines).alignment(Alignment::Center);

    frame.render_widget(banner, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cache = CacheManager::new();
    let client = UsersClient::new();

    let mut app = App::with_startup_config(config.clone());

    // Serve a fresh snapshot without touching the network
    if let Some(snapshot) = cache.as_ref().and_then(|c| c.load()) {
        if snapshot.is_fresh(Utc::now()) {
            app.populate_from_snapshot(snapshot);
        }
    }

    let refresh_config = RefreshConfig {
        enabled: !config.no_refresh,
        ..Default::default()
    };
    let mut refresh = RefreshHandle::spawn(refresh_config, client, cache);

    // Cache miss or stale snapshot: run the fetch-and-store path now
    if app.state == AppState::Loading {
        refresh.request_refresh().await;
    }

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Drain pending refresh results without blocking
        while let Some(message) = refresh::try_recv(&mut refresh) {
            app.apply_refresh_message(message);
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            refresh.request_refresh().await;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    refresh.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
