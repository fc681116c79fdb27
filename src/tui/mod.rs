//! # TUI Adapter
//!
//! The ratatui-specific layer: the View Shell. Handles terminal I/O,
//! renders the UI, and translates keyboard and mouse events into
//! `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner, notification countdown): polls every ~80ms.
//! - **Idle**: polls up to 250ms and redraws only on events, resizes or
//!   background results.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::table::Column;
use crate::core::table::SelectAllState;
use crate::loader::{self, HttpUserSource, UserSource};
use crate::tui::components::TableHit;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::Hit;

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive the table (sort, select, page).
    Table,
    /// Text editing in the focused filter input.
    Filter,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub mode: InputMode,
    pub focused_filter: Column,
    /// Keyboard cursor within the visible window.
    pub cursor: usize,
    pub table_state: ratatui::widgets::TableState,
    /// Frame area of the last draw, for mouse hit testing.
    pub frame_area: Rect,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            mode: InputMode::Table,
            focused_filter: Column::Name,
            cursor: 0,
            table_state: ratatui::widgets::TableState::default(),
            frame_area: Rect::default(),
        }
    }

    /// Keep the cursor inside a window of `visible_rows` rows.
    pub fn clamp_cursor(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            self.cursor = 0;
            self.table_state.select(None);
        } else {
            self.cursor = self.cursor.min(visible_rows - 1);
            self.table_state.select(Some(self.cursor));
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Id of the user under the cursor on the current page.
fn cursor_user_id(app: &App, tui: &TuiState) -> Option<String> {
    app.table
        .view(app.users())
        .rows
        .get(tui.cursor)
        .map(|u| u.id.clone())
}

fn select_all_click(app: &App) -> Action {
    let all = app.table.select_all_state(app.users().len()) == SelectAllState::All;
    Action::ToggleSelectAll(!all)
}

/// Translate one terminal event into at most one core action, updating
/// TUI-local state (mode, focus, cursor) along the way.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if let TuiEvent::MouseClick(x, y) = *event {
        // Filters and table are only on screen once a load has succeeded.
        if app.store.loading || app.store.error.is_some() {
            return None;
        }
        let offset = tui.table_state.offset();
        return match ui::hit_test(tui.frame_area, offset, x, y)? {
            Hit::Filter(column) => {
                tui.mode = InputMode::Filter;
                tui.focused_filter = column;
                None
            }
            Hit::Table(TableHit::SelectAll) => Some(select_all_click(app)),
            Hit::Table(TableHit::Header(column)) => Some(Action::Sort(column)),
            Hit::Table(TableHit::Row(index)) => {
                let id = app.table.view(app.users()).rows.get(index)?.id.clone();
                tui.cursor = index;
                Some(Action::ToggleRow(id))
            }
        };
    }

    match tui.mode {
        InputMode::Filter => match event {
            TuiEvent::InputChar(c) => {
                let mut text = app.table.filters.get(tui.focused_filter).to_string();
                text.push(*c);
                Some(Action::SetFilter(tui.focused_filter, text))
            }
            TuiEvent::Backspace => {
                let mut text = app.table.filters.get(tui.focused_filter).to_string();
                text.pop()?;
                Some(Action::SetFilter(tui.focused_filter, text))
            }
            TuiEvent::Tab => {
                tui.focused_filter = tui.focused_filter.next();
                None
            }
            TuiEvent::Escape | TuiEvent::Submit => {
                tui.mode = InputMode::Table;
                None
            }
            _ => None,
        },
        InputMode::Table => match event {
            TuiEvent::InputChar(c @ '1'..='4') => {
                let index = (*c as usize) - ('1' as usize);
                Some(Action::Sort(Column::ALL[index]))
            }
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                tui.cursor = tui.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                tui.cursor += 1;
                None
            }
            TuiEvent::InputChar(' ') => cursor_user_id(app, tui).map(Action::ToggleRow),
            TuiEvent::InputChar('a') => Some(select_all_click(app)),
            TuiEvent::CursorLeft | TuiEvent::PageUp | TuiEvent::InputChar('h') => {
                Some(Action::PrevPage)
            }
            TuiEvent::CursorRight | TuiEvent::PageDown | TuiEvent::InputChar('l') => {
                Some(Action::NextPage)
            }
            TuiEvent::InputChar('r') => Some(Action::CycleRowsPerPage),
            TuiEvent::InputChar('/') | TuiEvent::InputChar('f') | TuiEvent::Tab => {
                tui.mode = InputMode::Filter;
                None
            }
            TuiEvent::InputChar('t') => Some(Action::ToggleTheme),
            TuiEvent::InputChar('x') | TuiEvent::Escape => Some(Action::DismissNotification),
            TuiEvent::InputChar('R') => Some(Action::Load),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn UserSource> = Arc::new(HttpUserSource::new(
        config.endpoint.clone(),
        config.api_key.clone(),
    ));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // The one load per session; later loads only happen on explicit reload.
    if let Effect::SpawnLoad(generation) = update(&mut app, Action::Load) {
        spawn_load(source.clone(), generation, tx.clone());
    }

    let start_time = Instant::now();
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    loop {
        let now = Instant::now();
        let had_notification = app.notification.is_some();
        update(&mut app, Action::Tick(now - last_tick));
        last_tick = now;
        if had_notification && app.notification.is_none() {
            needs_redraw = true;
        }

        let animating = app.store.loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating || app.notification.is_some() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = handle_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SpawnLoad(generation) => {
                    spawn_load(source.clone(), generation, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (load results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received load result");
            if let Effect::SpawnLoad(generation) = update(&mut app, action) {
                spawn_load(source.clone(), generation, tx.clone());
            }
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_load(source: Arc<dyn UserSource>, generation: u64, tx: mpsc::Sender<Action>) {
    info!("Spawning user load #{} via {}", generation, source.name());
    tokio::spawn(async move {
        let result = loader::load_users(source.as_ref()).await;
        if tx.send(Action::LoadFinished { generation, result }).is_err() {
            warn!(
                "Failed to deliver load #{} result: receiver dropped",
                generation
            );
        }
    });
}
