//! Theme palettes for the TUI.
//!
//! The palette is picked from the explicit `ThemeMode` held in `App`, so
//! every component reads the same value for the whole frame.

use ratatui::style::{Color, Modifier, Style};

use crate::ThemeMode;

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Page background.
    pub background: Color,
    /// Surface behind the table and filters.
    pub paper: Color,
    pub text: Color,
    pub muted: Color,
    /// Accent for the title and active elements.
    pub accent: Color,
    pub border: Color,
    /// Border of the focused filter input.
    pub focus_border: Color,
    /// Style for the table header row.
    pub header: Style,
    /// Style for the row under the keyboard cursor.
    pub cursor: Style,
    /// Style for rows in the Selection Set.
    pub selected: Style,
    pub active: Color,
    pub inactive: Color,
    /// Inline error text.
    pub error: Style,
    /// Error notification body.
    pub toast: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Dark palette (#121212 background, #1e1e1e surfaces).
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x12, 0x12, 0x12),
            paper: Color::Rgb(0x1e, 0x1e, 0x1e),
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            focus_border: Color::Cyan,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            cursor: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::LightCyan),
            active: Color::Green,
            inactive: Color::Red,
            error: Style::default().fg(Color::LightRed),
            toast: Style::default().fg(Color::White).bg(Color::Red),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            paper: Color::White,
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            border: Color::Gray,
            focus_border: Color::Blue,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            cursor: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Blue),
            active: Color::Green,
            inactive: Color::Red,
            error: Style::default().fg(Color::Red),
            toast: Style::default().fg(Color::White).bg(Color::Red),
        }
    }

    /// Base style for the whole frame.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn status_style(&self, active: bool) -> Style {
        let color = if active { self.active } else { self.inactive };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
