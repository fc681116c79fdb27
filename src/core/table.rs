//! # Table Engine
//!
//! Derives the visible window of users from the full collection and the
//! table's own UI state, and applies user actions to that state.
//!
//! ```text
//! users ──► filter (AND of 4 columns) ──► sort (order_by, direction) ──► page slice
//! ```
//!
//! The stage order is fixed. The engine never touches the collection
//! itself; it only owns filters, sort, pagination and the Selection Set.
//! Every operation is total, including over an empty collection.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::core::user::{UserRecord, format_date};

/// Page sizes offered by the pagination control.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// A filterable and sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Name,
    Balance,
    Email,
    RegisterAt,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Name,
        Column::Balance,
        Column::Email,
        Column::RegisterAt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Balance => "Balance ($)",
            Column::Email => "Email",
            Column::RegisterAt => "Registration",
        }
    }

    /// Label of the filter input for this column.
    pub fn filter_label(self) -> &'static str {
        match self {
            Column::Name => "Filter by name",
            Column::Balance => "Filter by balance",
            Column::Email => "Filter by email",
            Column::RegisterAt => "Filter by registration",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Balance)
    }

    /// Cycle to the next column (filter focus order).
    pub fn next(self) -> Self {
        match self {
            Column::Name => Column::Balance,
            Column::Balance => Column::Email,
            Column::Email => Column::RegisterAt,
            Column::RegisterAt => Column::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Natural ordering of two users on one column.
pub fn compare(a: &UserRecord, b: &UserRecord, column: Column) -> Ordering {
    match column {
        Column::Name => a.name.cmp(&b.name),
        Column::Balance => a.balance.total_cmp(&b.balance),
        Column::Email => a.email.cmp(&b.email),
        Column::RegisterAt => a.register_at.cmp(&b.register_at),
    }
}

/// Comparator for a sort key and direction. Descending reverses the
/// comparator itself, so ties keep their input order either way.
pub fn comparator(
    direction: SortDirection,
    column: Column,
) -> impl Fn(&&UserRecord, &&UserRecord) -> Ordering {
    move |a, b| match direction {
        SortDirection::Asc => compare(a, b, column),
        SortDirection::Desc => compare(b, a, column),
    }
}

/// Free-text filter per column. Empty text matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub name: String,
    pub balance: String,
    pub email: String,
    pub register_at: String,
}

impl Filters {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Balance => &self.balance,
            Column::Email => &self.email,
            Column::RegisterAt => &self.register_at,
        }
    }

    fn slot(&mut self, column: Column) -> &mut String {
        match column {
            Column::Name => &mut self.name,
            Column::Balance => &mut self.balance,
            Column::Email => &mut self.email,
            Column::RegisterAt => &mut self.register_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        Column::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// True when the user satisfies all four column filters.
    ///
    /// Name and email match case-insensitively. Balance and registration
    /// match against their display strings (`150`, `2023-03-14`), so a
    /// balance filter of `5` matches `150`.
    pub fn matches(&self, user: &UserRecord) -> bool {
        contains_ignore_case(&user.name, &self.name)
            && (self.balance.is_empty() || user.balance_text().contains(&self.balance))
            && contains_ignore_case(&user.email, &self.email)
            && (self.register_at.is_empty()
                || format_date(&user.register_at).contains(&self.register_at))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Tri-state of the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    None,
    /// Some but not all users are selected (indeterminate checkbox).
    Some,
    All,
}

/// The rows to draw for the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a UserRecord>,
    /// Users passing the filters, across all pages.
    pub total: usize,
    /// Blank rows a renderer should add to keep the table height constant.
    pub empty_rows: usize,
}

/// Table UI state owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub filters: Filters,
    pub order_by: Column,
    pub direction: SortDirection,
    pub page: usize,
    pub rows_per_page: usize,
    /// Selected ids in the order they were picked.
    pub selected: Vec<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl TableState {
    /// Falls back to the default page size if `rows_per_page` is not an offered option.
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            rows_per_page
        } else {
            DEFAULT_ROWS_PER_PAGE
        };
        Self {
            filters: Filters::default(),
            order_by: Column::default(),
            direction: SortDirection::default(),
            page: 0,
            rows_per_page,
            selected: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Replace one column's filter text. Always returns to the first page.
    pub fn set_filter(&mut self, column: Column, text: impl Into<String>) {
        *self.filters.slot(column) = text.into();
        self.page = 0;
    }

    /// Clicking the active column flips direction; any other column
    /// becomes the sort key, ascending. The page is kept.
    pub fn set_sort(&mut self, column: Column) {
        if self.order_by == column {
            self.direction = self.direction.flipped();
        } else {
            self.order_by = column;
            self.direction = SortDirection::Asc;
        }
        debug!("Sort: {:?} {:?}", self.order_by, self.direction);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size and return to the first page. Sizes outside
    /// `ROWS_PER_PAGE_OPTIONS` are ignored; returns whether it was applied.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            warn!("Ignoring unsupported page size {}", rows_per_page);
            return false;
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        true
    }

    /// Next entry of `ROWS_PER_PAGE_OPTIONS`, wrapping around.
    pub fn next_rows_per_page(&self) -> usize {
        let index = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|n| *n == self.rows_per_page)
            .map(|i| (i + 1) % ROWS_PER_PAGE_OPTIONS.len())
            .unwrap_or(0);
        ROWS_PER_PAGE_OPTIONS[index]
    }

    /// Flip one id's membership. Ids absent from `users` are ignored so the
    /// Selection Set stays a subset of the collection.
    pub fn toggle_row(&mut self, id: &str, users: &[UserRecord]) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else if users.iter().any(|u| u.id == id) {
            self.selected.push(id.to_string());
        }
    }

    /// `true` selects every user in the collection (not just the page),
    /// `false` clears the selection.
    pub fn toggle_select_all(&mut self, checked: bool, users: &[UserRecord]) {
        self.selected = if checked {
            users.iter().map(|u| u.id.clone()).collect()
        } else {
            Vec::new()
        };
    }

    /// Drop selected ids that are no longer in `users` (after a reload).
    pub fn retain_selection(&mut self, users: &[UserRecord]) {
        let before = self.selected.len();
        self.selected.retain(|id| users.iter().any(|u| &u.id == id));
        if self.selected.len() != before {
            debug!(
                "Dropped {} stale selections after reload",
                before - self.selected.len()
            );
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn select_all_state(&self, total_users: usize) -> SelectAllState {
        match self.selected.len() {
            0 => SelectAllState::None,
            n if total_users > 0 && n >= total_users => SelectAllState::All,
            _ => SelectAllState::Some,
        }
    }

    /// Number of pages for `total` filtered rows (at least one).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page).max(1)
    }

    /// Filter and sort stages, without pagination.
    pub fn filtered_sorted<'a>(&self, users: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let mut rows: Vec<&UserRecord> = users.iter().filter(|u| self.filters.matches(u)).collect();
        rows.sort_by(comparator(self.direction, self.order_by));
        rows
    }

    /// Full pipeline: filter, sort, then slice the current page.
    pub fn view<'a>(&self, users: &'a [UserRecord]) -> TableView<'a> {
        let rows = self.filtered_sorted(users);
        let total = rows.len();
        let start = self.page.saturating_mul(self.rows_per_page);
        let window = rows
            .into_iter()
            .skip(start)
            .take(self.rows_per_page)
            .collect();
        let empty_rows = if self.page > 0 {
            self.page
                .saturating_add(1)
                .saturating_mul(self.rows_per_page)
                .saturating_sub(total)
        } else {
            0
        };
        TableView {
            rows: window,
            total,
            empty_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{user, users_numbered};

    fn ids(rows: &[&UserRecord]) -> Vec<String> {
        rows.iter().map(|u| u.id.clone()).collect()
    }

    fn bob_and_ann() -> Vec<UserRecord> {
        vec![
            user("1", "Bob", 150.0, "bob@example.com", "2023-03-14T10:00:00Z", true),
            user("2", "ann", 5.0, "ANN@Example.com", "2021-07-01T08:30:00Z", false),
        ]
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let users = bob_and_ann();
        let mut table = TableState::default();
        table.set_filter(Column::Name, "AN");
        assert_eq!(ids(&table.view(&users).rows), vec!["2"]);
    }

    #[test]
    fn test_balance_filter_matches_decimal_text() {
        let users = bob_and_ann();
        let mut table = TableState::default();
        table.set_filter(Column::Balance, "5");
        assert_eq!(table.view(&users).total, 2);

        table.set_filter(Column::Balance, "15");
        assert_eq!(ids(&table.view(&users).rows), vec!["1"]);
    }

    #[test]
    fn test_email_and_registration_filters() {
        let users = bob_and_ann();
        let mut table = TableState::default();
        table.set_filter(Column::Email, "example.COM");
        assert_eq!(table.view(&users).total, 2);

        table.set_filter(Column::RegisterAt, "2021-07");
        assert_eq!(ids(&table.view(&users).rows), vec!["2"]);

        table.set_filter(Column::RegisterAt, "07/01");
        assert_eq!(table.view(&users).total, 0);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let users = bob_and_ann();
        let mut table = TableState::default();
        table.set_filter(Column::Name, "b");
        table.set_filter(Column::Balance, "5");
        assert_eq!(ids(&table.view(&users).rows), vec!["1"]);

        table.set_filter(Column::Email, "ann");
        assert!(table.view(&users).rows.is_empty());
    }

    #[test]
    fn test_filtered_rows_are_subset_satisfying_all_filters() {
        let users = users_numbered(40);
        let mut table = TableState::default();
        table.set_filter(Column::Name, "1");
        table.set_filter(Column::Balance, "0");
        let rows = table.filtered_sorted(&users);
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(users.contains(row));
            assert!(table.filters.matches(row));
        }
        let expected = users.iter().filter(|u| table.filters.matches(u)).count();
        assert_eq!(rows.len(), expected);
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let users = users_numbered(7);
        let table = TableState::default();
        assert!(table.filters.is_empty());
        assert_eq!(table.view(&users).total, 7);
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let users = vec![
            user("1", "Carol", 1.0, "c@x", "2020-01-01", true),
            user("2", "Alice", 2.0, "a@x", "2020-01-01", true),
            user("3", "Bob", 3.0, "b@x", "2020-01-01", true),
        ];
        let table = TableState::default();
        assert_eq!(ids(&table.view(&users).rows), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_numeric_and_chronological() {
        let users = vec![
            user("1", "a", 100.0, "a@x", "2022-01-01", true),
            user("2", "b", 9.5, "b@x", "2020-01-01", true),
            user("3", "c", 20.0, "c@x", "2021-01-01", true),
        ];
        let mut table = TableState::default();
        table.set_sort(Column::Balance);
        assert_eq!(ids(&table.view(&users).rows), vec!["2", "3", "1"]);

        table.set_sort(Column::RegisterAt);
        assert_eq!(table.direction, SortDirection::Asc);
        assert_eq!(ids(&table.view(&users).rows), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_descending_reverses_when_no_ties() {
        let users = users_numbered(15);
        let mut table = TableState::default();
        table.set_sort(Column::Balance);
        let asc = ids(&table.filtered_sorted(&users));
        table.set_sort(Column::Balance);
        assert_eq!(table.direction, SortDirection::Desc);
        let mut desc = ids(&table.filtered_sorted(&users));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let users = vec![
            user("1", "same", 1.0, "a@x", "2020-01-01", true),
            user("2", "same", 2.0, "b@x", "2020-01-01", true),
            user("3", "other", 3.0, "c@x", "2020-01-01", true),
        ];
        let mut table = TableState::default();
        assert_eq!(ids(&table.view(&users).rows), vec!["3", "1", "2"]);
        table.set_sort(Column::Name);
        assert_eq!(ids(&table.view(&users).rows), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_toggle_rule() {
        let mut table = TableState::default();
        table.set_sort(Column::Name);
        assert_eq!(table.direction, SortDirection::Desc);
        table.set_sort(Column::Email);
        assert_eq!(table.order_by, Column::Email);
        assert_eq!(table.direction, SortDirection::Asc);
        table.set_sort(Column::Email);
        assert_eq!(table.direction, SortDirection::Desc);
    }

    #[test]
    fn test_pages_concatenate_to_full_sequence() {
        let users = users_numbered(57);
        let mut table = TableState::default();
        table.set_rows_per_page(25);
        table.set_sort(Column::Balance);
        let full = ids(&table.filtered_sorted(&users));

        let mut stitched = Vec::new();
        for page in 0..table.page_count(full.len()) {
            table.set_page(page);
            stitched.extend(ids(&table.view(&users).rows));
        }
        assert_eq!(stitched, full);
    }

    #[test]
    fn test_second_page_window_and_padding() {
        let users = users_numbered(12);
        let mut table = TableState::default();
        table.set_page(1);
        let view = table.view(&users);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.total, 12);
        assert_eq!(view.empty_rows, 8);
    }

    #[test]
    fn test_first_page_never_padded() {
        let users = users_numbered(3);
        let table = TableState::default();
        assert_eq!(table.view(&users).empty_rows, 0);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let users = users_numbered(5);
        let mut table = TableState::default();
        table.set_page(4);
        let view = table.view(&users);
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_rows, 45);
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let users = users_numbered(3);
        let mut table = TableState::default();
        for page in [usize::MAX, usize::MAX / 10] {
            table.set_page(page);
            let view = table.view(&users);
            assert!(view.rows.is_empty());
            assert_eq!(view.total, 3);
            assert_eq!(view.empty_rows, usize::MAX - 3);
        }
    }

    #[test]
    fn test_filter_resets_page_but_sort_does_not() {
        let mut table = TableState::default();
        table.set_page(3);
        table.set_sort(Column::Balance);
        assert_eq!(table.page, 3);
        table.set_filter(Column::Email, "x");
        assert_eq!(table.page, 0);
    }

    #[test]
    fn test_rows_per_page_resets_page_and_rejects_unknown_sizes() {
        let mut table = TableState::default();
        table.set_page(2);
        assert!(table.set_rows_per_page(50));
        assert_eq!(table.page, 0);
        assert_eq!(table.rows_per_page, 50);

        table.set_page(1);
        assert!(!table.set_rows_per_page(7));
        assert_eq!(table.page, 1);
        assert_eq!(table.rows_per_page, 50);
    }

    #[test]
    fn test_next_rows_per_page_wraps() {
        let mut table = TableState::default();
        assert_eq!(table.next_rows_per_page(), 25);
        table.set_rows_per_page(50);
        assert_eq!(table.next_rows_per_page(), 10);
    }

    #[test]
    fn test_new_falls_back_to_default_page_size() {
        assert_eq!(TableState::new(25).rows_per_page, 25);
        assert_eq!(TableState::new(33).rows_per_page, DEFAULT_ROWS_PER_PAGE);
    }

    #[test]
    fn test_page_count() {
        let table = TableState::default();
        assert_eq!(table.page_count(0), 1);
        assert_eq!(table.page_count(10), 1);
        assert_eq!(table.page_count(11), 2);
    }

    #[test]
    fn test_toggle_row_preserves_order_of_remaining_ids() {
        let users = users_numbered(4);
        let mut table = TableState::default();
        for id in ["user-1", "user-2", "user-3"] {
            table.toggle_row(id, &users);
        }
        table.toggle_row("user-2", &users);
        assert_eq!(table.selected, vec!["user-1", "user-3"]);
        assert!(table.is_selected("user-3"));
        assert!(!table.is_selected("user-2"));
    }

    #[test]
    fn test_toggle_row_ignores_unknown_ids() {
        let users = users_numbered(2);
        let mut table = TableState::default();
        table.toggle_row("ghost", &users);
        assert!(table.selected.is_empty());
    }

    #[test]
    fn test_select_all_covers_whole_collection_not_page() {
        let users = users_numbered(30);
        let mut table = TableState::default();
        table.set_filter(Column::Name, "User 1");
        table.toggle_select_all(true, &users);
        assert_eq!(table.selected.len(), 30);
        assert_eq!(table.select_all_state(users.len()), SelectAllState::All);

        table.toggle_select_all(false, &users);
        assert_eq!(table.select_all_state(users.len()), SelectAllState::None);
    }

    #[test]
    fn test_select_all_state_indeterminate() {
        let users = users_numbered(3);
        let mut table = TableState::default();
        table.toggle_row("user-2", &users);
        assert_eq!(table.select_all_state(users.len()), SelectAllState::Some);
    }

    #[test]
    fn test_selection_survives_filter_sort_and_paging() {
        let users = users_numbered(30);
        let mut table = TableState::default();
        table.toggle_row("user-5", &users);
        table.set_filter(Column::Name, "zzz");
        table.set_sort(Column::Email);
        table.set_page(2);
        assert_eq!(table.selected, vec!["user-5"]);
    }

    #[test]
    fn test_retain_selection_drops_missing_ids() {
        let users = users_numbered(5);
        let mut table = TableState::default();
        table.toggle_select_all(true, &users);
        let reloaded = users_numbered(3);
        table.retain_selection(&reloaded);
        assert_eq!(table.selected, vec!["user-1", "user-2", "user-3"]);
    }

    #[test]
    fn test_empty_collection_is_total() {
        let users: Vec<UserRecord> = Vec::new();
        let mut table = TableState::default();
        table.set_page(2);
        table.toggle_select_all(true, &users);
        let view = table.view(&users);
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0);
        assert_eq!(table.select_all_state(0), SelectAllState::None);
    }
}
