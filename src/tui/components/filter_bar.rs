//! # FilterBar Component
//!
//! Four labelled text inputs, one per filterable column. The focused input
//! gets a highlighted border and the terminal cursor.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

use crate::core::table::{Column, Filters};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct FilterBar<'a> {
    pub filters: &'a Filters,
    /// Input being edited, if the bar has focus.
    pub focused: Option<Column>,
    pub theme: &'a Theme,
}

fn input_areas(area: Rect) -> Rc<[Rect]> {
    Layout::horizontal([Constraint::Fill(1); 4])
        .spacing(1)
        .split(area)
}

/// Which filter input, if any, is at the given screen position.
pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<Column> {
    let position = Position::new(x, y);
    input_areas(area)
        .iter()
        .position(|r| r.contains(position))
        .map(|i| Column::ALL[i])
}

impl Component for FilterBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let areas = input_areas(area);
        for (column, input_area) in Column::ALL.iter().zip(areas.iter()) {
            let is_focused = self.focused == Some(*column);
            let border = if is_focused {
                self.theme.focus_border
            } else {
                self.theme.border
            };
            let text = self.filters.get(*column);
            let input = Paragraph::new(text)
                .style(Style::default().fg(self.theme.text).bg(self.theme.paper))
                .block(
                    Block::bordered()
                        .title(column.filter_label())
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(input, *input_area);

            if is_focused {
                let max_x = input_area.right().saturating_sub(2);
                let x = (input_area.x + 1 + text.width() as u16).min(max_x);
                frame.set_cursor_position(Position::new(x, input_area.y + 1));
            }
        }
    }
}
