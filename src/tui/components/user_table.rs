//! # UserTable Component
//!
//! Renders the visible window produced by the table engine: a select-all
//! header checkbox, sortable column headers with a direction marker, one
//! row per user and blank padding rows so the table height stays constant
//! on a short last page.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ratatui::widgets::TableState` (cursor + scroll offset) lives in `TuiState`
//! - `UserTable` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Row, Table};

use crate::core::table::{Column, SelectAllState, SortDirection, TableState, TableView};
use crate::core::user::format_date;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Checkbox, Name, Balance, Email, Registration, Status.
const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Length(3),
    Constraint::Fill(2),
    Constraint::Length(14),
    Constraint::Fill(3),
    Constraint::Length(14),
    Constraint::Length(8),
];

const COLUMN_SPACING: u16 = 1;

/// What a click inside the table landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    SelectAll,
    Header(Column),
    /// Index into the rendered rows (may point at a padding row).
    Row(usize),
}

/// Map a screen position to a table element. `offset` is the scroll offset
/// of the rendered table.
pub fn hit_test(area: Rect, offset: usize, x: u16, y: u16) -> Option<TableHit> {
    let inner = area.inner(Margin::new(1, 1));
    if !inner.contains(Position::new(x, y)) {
        return None;
    }
    if y > inner.y {
        return Some(TableHit::Row(offset + (y - inner.y - 1) as usize));
    }
    let columns = Layout::horizontal(COLUMN_WIDTHS)
        .spacing(COLUMN_SPACING)
        .split(inner);
    match columns.iter().position(|r| x >= r.x && x < r.right())? {
        0 => Some(TableHit::SelectAll),
        i @ 1..=4 => Some(TableHit::Header(Column::ALL[i - 1])),
        _ => None,
    }
}

pub fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn select_all_checkbox(state: SelectAllState) -> &'static str {
    match state {
        SelectAllState::None => "[ ]",
        SelectAllState::Some => "[-]",
        SelectAllState::All => "[x]",
    }
}

pub struct UserTable<'a> {
    pub view: &'a TableView<'a>,
    pub table: &'a TableState,
    /// Size of the full collection (for the select-all checkbox).
    pub total_users: usize,
    pub theme: &'a Theme,
    pub state: &'a mut ratatui::widgets::TableState,
}

impl UserTable<'_> {
    fn header_label(&self, column: Column) -> String {
        if self.table.order_by != column {
            return column.label().to_string();
        }
        let marker = match self.table.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        };
        format!("{} {}", column.label(), marker)
    }

    fn header(&self) -> Row<'static> {
        let mut cells = vec![Cell::from(select_all_checkbox(
            self.table.select_all_state(self.total_users),
        ))];
        for column in Column::ALL {
            let label = Line::from(self.header_label(column));
            let label = if column.is_numeric() {
                label.right_aligned()
            } else {
                label
            };
            cells.push(Cell::from(label));
        }
        cells.push(Cell::from("Status"));
        Row::new(cells).style(self.theme.header)
    }

    fn title(&self) -> Line<'static> {
        let selected = self.table.selected.len();
        if selected > 0 {
            Line::from(Span::styled(
                format!(" {} selected ", selected),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(" Users ")
        }
    }
}

impl Component for UserTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut rows: Vec<Row> = self
            .view
            .rows
            .iter()
            .map(|user| {
                let is_selected = self.table.is_selected(&user.id);
                let row = Row::new(vec![
                    Cell::from(checkbox(is_selected)),
                    Cell::from(user.name.clone()),
                    Cell::from(Line::from(user.balance_text()).right_aligned()),
                    Cell::from(user.email.clone()),
                    Cell::from(format_date(&user.register_at)),
                    Cell::from(Span::styled(
                        user.status_label(),
                        self.theme.status_style(user.active),
                    )),
                ]);
                if is_selected {
                    row.style(self.theme.selected)
                } else {
                    row
                }
            })
            .collect();
        // Never more blank rows than one page can hold.
        let padding = self
            .view
            .empty_rows
            .min(self.table.rows_per_page.saturating_sub(self.view.rows.len()));
        rows.extend((0..padding).map(|_| Row::new(Vec::<Cell>::new())));

        if self.view.rows.is_empty() {
            self.state.select(None);
        }

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(self.header())
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(self.theme.cursor)
            .style(Style::default().fg(self.theme.text).bg(self.theme.paper))
            .block(
                Block::bordered()
                    .title(self.title())
                    .border_style(Style::default().fg(self.theme.border)),
            );

        frame.render_stateful_widget(table, area, self.state);
    }
}
