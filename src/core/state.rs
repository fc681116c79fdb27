//! # Application State
//!
//! Core business state for userdash. Domain logic only, no TUI types.
//!
//! ```text
//! App
//! ├── theme: ThemeMode               // light/dark, toggled explicitly
//! ├── store: UserStore               // loading / error / users + load generation
//! ├── table: TableState              // filters, sort, page, Selection Set
//! ├── notification: Option<Notification>  // auto-hiding error toast
//! ├── notification_timeout: Duration
//! └── status_message: String         // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::Duration;

use log::{debug, info};

use crate::ThemeMode;
use crate::core::config::ResolvedConfig;
use crate::core::table::TableState;
use crate::core::user::UserRecord;

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(6000);

/// Result of one loader invocation, plus the guard against stale results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStore {
    pub loading: bool,
    pub error: Option<String>,
    pub users: Vec<UserRecord>,
    /// Generation of the most recently started load.
    pub generation: u64,
}

impl UserStore {
    /// Start a load and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        debug!("Load #{} started", self.generation);
        self.generation
    }

    /// Apply a finished load. Results from anything but the latest load are
    /// dropped; returns whether this one was applied.
    pub fn settle(&mut self, generation: u64, result: Result<Vec<UserRecord>, String>) -> bool {
        if generation != self.generation {
            info!(
                "Discarding stale load #{} (latest is #{})",
                generation, self.generation
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
            }
            Err(message) => {
                self.users = Vec::new();
                self.error = Some(message);
            }
        }
        true
    }
}

/// Dismissible error toast that hides itself after a countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub remaining: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, auto_hide: Duration) -> Self {
        Self {
            message: message.into(),
            remaining: auto_hide,
        }
    }

    /// Count down by `elapsed`; returns true once the toast has expired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining.is_zero()
    }
}

pub struct App {
    pub theme: ThemeMode,
    pub store: UserStore,
    pub table: TableState,
    pub notification: Option<Notification>,
    pub notification_timeout: Duration,
    pub status_message: String,
}

impl App {
    pub fn new(theme: ThemeMode, rows_per_page: usize) -> Self {
        Self {
            theme,
            store: UserStore::default(),
            table: TableState::new(rows_per_page),
            notification: None,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            status_message: String::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.theme, config.rows_per_page);
        app.notification_timeout = config.notification_timeout;
        app
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.store.users
    }
}
