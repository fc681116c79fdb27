//! # Notification Component
//!
//! Error toast anchored to the bottom-right corner, drawn over everything
//! else. Visibility and the auto-hide countdown live in core state; this
//! only paints the current message.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

const MAX_WIDTH: u16 = 60;
const HINT: &str = " x dismiss ";

pub struct Notification<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

/// Bottom-right rect sized to the message, clamped to `area`.
pub fn toast_area(message: &str, area: Rect) -> Rect {
    let width = (message.width() as u16 + 4).clamp(HINT.len() as u16 + 2, MAX_WIDTH);
    let width = width.min(area.width);
    let inner_width = width.saturating_sub(2).max(1);
    let lines = (message.width() as u16).div_ceil(inner_width).max(1);
    let height = (lines + 2).min(area.height);
    Rect::new(
        area.right().saturating_sub(width),
        area.bottom().saturating_sub(height),
        width,
        height,
    )
}

impl Component for Notification<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let toast = toast_area(self.message, area);
        frame.render_widget(Clear, toast);
        let body = Paragraph::new(self.message)
            .style(self.theme.toast)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(" Error ")
                    .title_bottom(Line::from(HINT).alignment(Alignment::Right))
                    .style(self.theme.toast),
            );
        frame.render_widget(body, toast);
    }
}
