//! # Data Loader
//!
//! Fetches the user collection once and converts it into `UserRecord`s.
//!
//! ```text
//! UserSource::fetch_users() ──► Vec<RawUser> ──► parse registerAt ──► Vec<UserRecord>
//!                         └──────── any failure ──► LoadError ──► failure_message()
//! ```
//!
//! Loading is all-or-nothing: the first bad record fails the whole load.

pub mod http;
pub mod source;

pub use http::HttpUserSource;
pub use source::{LoadError, UserSource};

use log::{info, warn};

use crate::core::user::UserRecord;

/// Prefix of every load failure shown to the user.
pub const FAILURE_PREFIX: &str = "Failed to fetch users: ";

/// Fetch once from `source` and convert every record.
pub async fn load_users(source: &dyn UserSource) -> Result<Vec<UserRecord>, LoadError> {
    let raw_users = source.fetch_users().await?;

    let users = raw_users
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let id = raw.id.clone();
            UserRecord::try_from(raw).map_err(|source| {
                warn!("Rejecting user list: record {} has {}", index, source);
                LoadError::Parse { index, id, source }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Loaded {} users from {}", users.len(), source.name());
    Ok(users)
}

/// The message shown inline and in the error notification.
pub fn failure_message(error: &LoadError) -> String {
    let detail = error.to_string();
    if detail.trim().is_empty() {
        format!("{FAILURE_PREFIX}Unknown error")
    } else {
        format!("{FAILURE_PREFIX}{detail}")
    }
}
