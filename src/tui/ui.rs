use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::core::table::Column;
use crate::core::user::format_date_time;
use crate::tui::component::Component;
use crate::tui::components::{
    FilterBar, Notification, Pagination, TableHit, TitleBar, UserTable, filter_bar, user_table,
};
use crate::tui::theme::Theme;
use crate::tui::{InputMode, TuiState};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Screen regions, top to bottom.
pub struct AppLayout {
    pub title: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub pagination: Rect,
    pub detail: Rect,
    pub help: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min};
        let [title, filters, table, pagination, detail, help] =
            Layout::vertical([Length(1), Length(3), Min(3), Length(1), Length(1), Length(1)])
                .areas(area);
        Self {
            title,
            filters,
            table,
            pagination,
            detail,
            help,
        }
    }

    /// Everything between the title bar and the help line.
    pub fn body(&self) -> Rect {
        self.filters.union(self.detail)
    }
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Filter(Column),
    Table(TableHit),
}

/// Hit test: given a screen position, find the filter input or table element under it.
pub fn hit_test(frame_area: Rect, table_offset: usize, x: u16, y: u16) -> Option<Hit> {
    let layout = AppLayout::new(frame_area);
    if let Some(column) = filter_bar::hit_test(layout.filters, x, y) {
        return Some(Hit::Filter(column));
    }
    user_table::hit_test(layout.table, table_offset, x, y).map(Hit::Table)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let theme = Theme::for_mode(app.theme);
    let area = frame.area();
    tui.frame_area = area;
    frame.render_widget(Block::default().style(theme.base()), area);

    let layout = AppLayout::new(area);

    TitleBar::new(app.status_message.clone(), app.theme, &theme).render(frame, layout.title);

    if app.store.loading {
        draw_loading_view(frame, layout.body(), &theme, spinner_frame);
    } else if let Some(error_msg) = &app.store.error {
        draw_error_view(frame, layout.body(), &theme, error_msg);
    } else {
        draw_table_view(frame, &layout, app, tui, &theme);
    }

    frame.render_widget(
        Line::styled(help_text(tui.mode), Style::default().fg(theme.muted)),
        layout.help,
    );

    if let Some(toast) = &app.notification {
        Notification {
            message: &toast.message,
            theme: &theme,
        }
        .render(frame, area);
    }
}

fn draw_table_view(frame: &mut Frame, layout: &AppLayout, app: &App, tui: &mut TuiState, theme: &Theme) {
    let view = app.table.view(app.users());
    tui.clamp_cursor(view.rows.len());

    FilterBar {
        filters: &app.table.filters,
        focused: (tui.mode == InputMode::Filter).then_some(tui.focused_filter),
        theme,
    }
    .render(frame, layout.filters);

    UserTable {
        view: &view,
        table: &app.table,
        total_users: app.users().len(),
        theme,
        state: &mut tui.table_state,
    }
    .render(frame, layout.table);

    Pagination {
        page: app.table.page,
        rows_per_page: app.table.rows_per_page,
        total: view.total,
        page_count: app.table.page_count(view.total),
        theme,
    }
    .render(frame, layout.pagination);

    if let Some(user) = view.rows.get(tui.cursor) {
        let detail = Line::from(vec![
            Span::styled("Registered ", Style::default().fg(theme.muted)),
            Span::raw(format_date_time(&user.register_at)),
            Span::styled("  ·  ", Style::default().fg(theme.muted)),
            Span::styled(user.mailto(), Style::default().fg(theme.accent)),
        ]);
        frame.render_widget(detail, layout.detail);
    }
}

fn draw_loading_view(frame: &mut Frame, area: Rect, theme: &Theme, spinner_frame: usize) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let loading = Paragraph::new(format!("{spinner} Loading users..."))
        .style(Style::default().fg(theme.accent))
        .alignment(Alignment::Center);
    frame.render_widget(loading, center);
}

fn draw_error_view(frame: &mut Frame, area: Rect, theme: &Theme, error_msg: &str) {
    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let error_paragraph = Paragraph::new(error_msg)
        .style(theme.error)
        .alignment(Alignment::Center);
    frame.render_widget(error_paragraph, center);
}

fn help_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Table => {
            " 1-4 sort  ↑↓ move  space select  a all  ←→ page  r rows  / filter  t theme  R reload  q quit"
        }
        InputMode::Filter => " type to filter  tab next field  enter/esc back to table",
    }
}
