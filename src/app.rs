//! Application state management for hubgrid
//!
//! This module contains the main application state, handling keyboard input,
//! refresh messages, and the search filter over the fetched user listing.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cache::Snapshot;
use crate::cli::StartupConfig;
use crate::data::UserProfile;
use crate::refresh::RefreshMessage;

/// Fixed user-facing message shown for any failed fetch
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch users.";

/// Application state enum representing the current view
///
/// The states are mutually exclusive and rendered in priority order:
/// loading, then error, then the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while the first fetch is in flight
    Loading,
    /// A fetch failed; the error banner replaces the grid
    Error(String),
    /// Grid view with the search bar
    UserGrid,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// The fetched user listing, in fetch order
    pub users: Vec<UserProfile>,
    /// Free-text search term typed into the search bar
    pub search_term: String,
    /// Index of the selected entry within the filtered listing
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a manual refresh has been requested
    pub refresh_requested: bool,
    /// Whether a fetch is currently in flight
    pub refreshing: bool,
    /// Timestamp of the listing currently shown
    pub last_refresh: Option<DateTime<Local>>,
}

impl App {
    /// Creates a new App instance in the loading state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            users: Vec::new(),
            search_term: String::new(),
            selected_index: 0,
            should_quit: false,
            refresh_requested: false,
            refreshing: false,
            last_refresh: None,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This is used to apply CLI arguments like --filter to seed the search
    /// term before the first render.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let mut app = Self::new();

        if let Some(term) = config.initial_filter {
            app.search_term = term;
        }

        app
    }

    /// Populates the view from a cached snapshot at startup
    ///
    /// Used when the persisted snapshot is still fresh; no network call is
    /// made on this path.
    pub fn populate_from_snapshot(&mut self, snapshot: Snapshot) {
        self.users = snapshot.data;
        self.last_refresh = Some(snapshot.timestamp.with_timezone(&Local));
        self.state = AppState::UserGrid;
    }

    /// The visible subset of the listing for the current search term
    ///
    /// Case-insensitive substring match on the login; the empty term matches
    /// every record. Fetch order is preserved.
    pub fn filtered_users(&self) -> Vec<&UserProfile> {
        let term = self.search_term.to_lowercase();
        self.users
            .iter()
            .filter(|user| user.login.to_lowercase().contains(&term))
            .collect()
    }

    /// The currently selected entry of the filtered listing, if any
    pub fn selected_user(&self) -> Option<&UserProfile> {
        self.filtered_users().get(self.selected_index).copied()
    }

    /// Applies a message from the background refresh task
    ///
    /// A successful refresh replaces the listing, clears any error state, and
    /// advances the shown timestamp. A failed refresh switches to the error
    /// state; the in-memory listing is kept for the next successful cycle.
    pub fn apply_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::RefreshStarted => {
                self.refreshing = true;
            }
            RefreshMessage::UsersUpdated { users, fetched_at } => {
                self.users = users;
                self.last_refresh = Some(fetched_at.with_timezone(&Local));
                self.clamp_selection();
                self.state = AppState::UserGrid;
            }
            RefreshMessage::RefreshError(detail) => {
                self.state = AppState::Error(detail);
            }
            RefreshMessage::RefreshCompleted => {
                self.refreshing = false;
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// Grid view:
    /// - printable characters: edit the search term
    /// - `Backspace`: delete the last character of the search term
    /// - `Esc`: clear the search term, or quit when it is already empty
    /// - `Up`/`Down`: move the selection through the filtered listing
    /// - `Enter`: open the selected profile in the system browser
    /// - `Ctrl+R`: force a refresh
    ///
    /// `Ctrl+C` quits from any state. While loading, `q` quits. In the error
    /// state, `q`/`Esc` quit and `r` retries.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Error(_) => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                _ => {}
            },
            AppState::UserGrid => self.handle_grid_key(key_event),
        }
    }

    /// Handles keyboard input in the grid view
    ///
    /// Printable keys go to the search bar, so grid actions live on
    /// non-printable keys and Ctrl combinations.
    fn handle_grid_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                if self.search_term.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_term.clear();
                    self.selected_index = 0;
                }
            }
            KeyCode::Backspace => {
                self.search_term.pop();
                self.clamp_selection();
            }
            KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Enter => {
                self.open_selected_profile();
            }
            KeyCode::Char('r') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_requested = true;
            }
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_term.push(c);
                self.selected_index = 0;
            }
            _ => {}
        }
    }

    /// Moves the selection up in the filtered listing, wrapping to the bottom
    fn move_selection_up(&mut self) {
        let count = self.filtered_users().len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the filtered listing, wrapping to the top
    fn move_selection_down(&mut self) {
        let count = self.filtered_users().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Keeps the selection inside the filtered listing after it shrinks
    fn clamp_selection(&mut self) {
        let count = self.filtered_users().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Opens the selected profile link in the system browser
    ///
    /// A launch failure is ignored; the TUI owns the terminal and there is
    /// nowhere to report it.
    fn open_selected_profile(&self) {
        if let Some(user) = self.selected_user() {
            let _ = open::that(&user.html_url);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
