//! # TitleBar Component
//!
//! Top bar: application title, status text and the current theme.
//!
//! Purely presentational. It receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Loading users...".to_string(), ThemeMode::Dark, &theme);
//! title_bar.render(frame, area);
//! ```
//!
//! The title text changes based on state:
//!
//! 1. **Status message**: `"User Management | 120 users"`
//! 2. **Default**: `"User Management"`

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ThemeMode;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const APP_TITLE: &str = "User Management";

pub struct TitleBar<'a> {
    /// Status message (e.g., "Loading users...", "120 users")
    pub status_message: String,
    pub mode: ThemeMode,
    pub theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(status_message: String, mode: ThemeMode, theme: &'a Theme) -> Self {
        Self {
            status_message,
            mode,
            theme,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            APP_TITLE.to_string()
        } else {
            format!("{} | {}", APP_TITLE, self.status_message)
        }
    }

    fn mode_text(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "☀ light",
            ThemeMode::Dark => "☾ dark",
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, mode_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(9)]).areas(area);

        let title = Line::from(Span::styled(
            self.title_text(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(title, title_area);

        let mode = Line::from(Span::styled(
            self.mode_text(),
            Style::default().fg(self.theme.muted),
        ))
        .right_aligned();
        frame.render_widget(mode, mode_area);
    }
}
