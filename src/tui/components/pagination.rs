//! # Pagination Component
//!
//! One-line footer under the table: page size, the `from–to of total`
//! range and the page position.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct Pagination<'a> {
    pub page: usize,
    pub rows_per_page: usize,
    /// Rows passing the filters.
    pub total: usize,
    pub page_count: usize,
    pub theme: &'a Theme,
}

/// `11–12 of 12`, or `0–0 of 0` when nothing matches.
pub fn range_label(page: usize, rows_per_page: usize, total: usize) -> String {
    if total == 0 {
        return "0–0 of 0".to_string();
    }
    let from = page
        .saturating_mul(rows_per_page)
        .saturating_add(1)
        .min(total);
    let to = page.saturating_add(1).saturating_mul(rows_per_page).min(total);
    format!("{from}–{to} of {total}")
}

impl Pagination<'_> {
    fn text(&self) -> String {
        format!(
            "Rows per page: {}   {}   Page {}/{}  ◀ ▶ ",
            self.rows_per_page,
            range_label(self.page, self.rows_per_page, self.total),
            self.page.saturating_add(1),
            self.page_count
        )
    }
}

impl Component for Pagination<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::styled(self.text(), Style::default().fg(self.theme.muted)).right_aligned();
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(0, 10, 12), "1–10 of 12");
        assert_eq!(range_label(1, 10, 12), "11–12 of 12");
        assert_eq!(range_label(0, 25, 0), "0–0 of 0");
    }

    #[test]
    fn test_range_label_huge_page_clamps_to_total() {
        assert_eq!(range_label(usize::MAX, 10, 3), "3–3 of 3");
        assert_eq!(range_label(usize::MAX / 10, 50, 3), "3–3 of 3");
    }

    #[test]
    fn test_page_indicator_saturates() {
        let theme = Theme::dark();
        let pagination = Pagination {
            page: usize::MAX,
            rows_per_page: 10,
            total: 3,
            page_count: 1,
            theme: &theme,
        };
        assert!(pagination.text().contains(&format!("Page {}/1", usize::MAX)));
    }

    #[test]
    fn test_pagination_render() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|f| {
                Pagination {
                    page: 1,
                    rows_per_page: 10,
                    total: 12,
                    page_count: 2,
                    theme: &theme,
                }
                .render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Rows per page: 10"));
        assert!(text.contains("of 12"));
        assert!(text.contains("Page 2/2"));
    }
}
