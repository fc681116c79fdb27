use std::fmt;

use async_trait::async_trait;

use crate::core::user::{RawUser, UserParseError};

/// Errors that can occur while loading the user collection.
/// Any of them fails the whole load; no partial collection is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Transport-level failure (DNS, connection refused, timeout).
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16, body: String },
    /// The body was not a JSON array of users.
    Decode(String),
    /// A record's `registerAt` could not be parsed.
    Parse {
        index: usize,
        id: String,
        source: UserParseError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Network(msg) => write!(f, "{msg}"),
            LoadError::Api { status, .. } => {
                write!(f, "Request failed with status code {status}")
            }
            LoadError::Decode(msg) => write!(f, "invalid response body: {msg}"),
            LoadError::Parse { index, id, source } => {
                write!(f, "record {index} (id {id}): {source}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Where the user collection comes from.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Performs exactly one read of the remote collection.
    async fn fetch_users(&self) -> Result<Vec<RawUser>, LoadError>;
}
