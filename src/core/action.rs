//! # Actions
//!
//! Everything that can happen in userdash becomes an `Action`.
//! User types into a filter? That's `Action::SetFilter(column, text)`.
//! The loader finishes? That's `Action::LoadFinished { generation, result }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the caller has to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::state::{App, Notification};
use crate::core::table::Column;
use crate::core::user::UserRecord;
use crate::loader::{LoadError, failure_message};

#[derive(Debug)]
pub enum Action {
    /// Start a (re)load of the collection.
    Load,
    LoadFinished {
        generation: u64,
        result: Result<Vec<UserRecord>, LoadError>,
    },
    SetFilter(Column, String),
    /// Header click on a sortable column.
    Sort(Column),
    SetPage(usize),
    NextPage,
    PrevPage,
    SetRowsPerPage(usize),
    CycleRowsPerPage,
    ToggleRow(String),
    /// Select-all checkbox changed to the given checked value.
    ToggleSelectAll(bool),
    ToggleTheme,
    DismissNotification,
    /// Time passed since the previous tick (drives notification auto-hide).
    Tick(Duration),
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run the loader and report back with `Action::LoadFinished` for this generation.
    SpawnLoad(u64),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load => {
            let generation = app.store.begin();
            app.status_message = "Loading users...".to_string();
            return Effect::SpawnLoad(generation);
        }
        Action::LoadFinished { generation, result } => {
            let result = result.map_err(|e| failure_message(&e));
            let failure = result.as_ref().err().cloned();
            if !app.store.settle(generation, result) {
                return Effect::None;
            }
            match failure {
                Some(message) => {
                    warn!("{}", message);
                    app.table.retain_selection(&[]);
                    app.notification = Some(Notification::new(message, app.notification_timeout));
                    app.status_message = "Load failed".to_string();
                }
                None => {
                    app.table.retain_selection(&app.store.users);
                    app.notification = None;
                    app.status_message = format!("{} users", app.store.users.len());
                    info!("Load #{} applied: {} users", generation, app.store.users.len());
                }
            }
        }
        Action::SetFilter(column, text) => {
            debug!("Filter {:?} = {:?}", column, text);
            app.table.set_filter(column, text);
        }
        Action::Sort(column) => app.table.set_sort(column),
        Action::SetPage(page) => app.table.set_page(page),
        Action::NextPage => {
            let total = app.table.filtered_sorted(&app.store.users).len();
            let last = app.table.page_count(total) - 1;
            app.table.set_page(app.table.page.saturating_add(1).min(last));
        }
        Action::PrevPage => {
            let page = app.table.page.saturating_sub(1);
            app.table.set_page(page);
        }
        Action::SetRowsPerPage(rows) => {
            app.table.set_rows_per_page(rows);
        }
        Action::CycleRowsPerPage => {
            let rows = app.table.next_rows_per_page();
            app.table.set_rows_per_page(rows);
        }
        Action::ToggleRow(id) => app.table.toggle_row(&id, &app.store.users),
        Action::ToggleSelectAll(checked) => {
            app.table.toggle_select_all(checked, &app.store.users);
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            info!("Theme switched to {}", app.theme.label());
        }
        Action::DismissNotification => app.notification = None,
        Action::Tick(elapsed) => {
            if let Some(toast) = app.notification.as_mut()
                && toast.advance(elapsed)
            {
                debug!("Notification auto-hidden");
                app.notification = None;
            }
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}
