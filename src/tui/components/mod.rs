//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app title, status and theme indicator
//! - `FilterBar`: the four column filter inputs
//! - `Pagination`: page size and range footer
//! - `Notification`: bottom-right error toast
//!
//! ### Stateful Components
//!
//! - `UserTable`: the visible window, borrowing the ratatui `TableState`
//!   (cursor + scroll offset) that persists in `TuiState`
//!
//! Each component file holds its rendering, hit testing and tests.

pub mod filter_bar;
pub mod notification;
pub mod pagination;
pub mod title_bar;
pub mod user_table;

pub use filter_bar::FilterBar;
pub use notification::Notification;
pub use pagination::Pagination;
pub use title_bar::TitleBar;
pub use user_table::{TableHit, UserTable};
