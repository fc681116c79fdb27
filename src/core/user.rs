//! # User Records
//!
//! The shape of one user and its conversion from transport data.
//!
//! The endpoint sends `registerAt` as a string. It is parsed exactly once,
//! when the collection is loaded, so a `UserRecord` always carries a real
//! timestamp and the table never has to re-parse it.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Naive date-time layouts accepted for `registerAt`, interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Date-only layouts accepted for `registerAt` (midnight UTC).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// One user as it arrives from the endpoint. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub email: String,
    pub register_at: String,
    pub active: bool,
}

/// One user after loading. `register_at` is always a valid timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub email: String,
    pub register_at: DateTime<Utc>,
    pub active: bool,
}

impl UserRecord {
    /// Balance as shown in the table, also the text the balance filter searches.
    pub fn balance_text(&self) -> String {
        self.balance.to_string()
    }

    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

impl TryFrom<RawUser> for UserRecord {
    type Error = UserParseError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let register_at = parse_register_at(&raw.register_at)?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            balance: raw.balance,
            email: raw.email,
            register_at,
            active: raw.active,
        })
    }
}

/// A `registerAt` value that could not be read as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserParseError {
    pub value: String,
}

impl fmt::Display for UserParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid registerAt timestamp {:?}", self.value)
    }
}

impl std::error::Error for UserParseError {}

/// Parse a transport timestamp.
///
/// Accepts RFC 3339, naive ISO date-times (UTC), bare dates, and all-digit
/// strings as epoch milliseconds.
pub fn parse_register_at(raw: &str) -> Result<DateTime<Utc>, UserParseError> {
    let value = raw.trim();
    let invalid = || UserParseError {
        value: raw.to_string(),
    };

    if value.is_empty() {
        return Err(invalid());
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = value.parse().map_err(|_| invalid())?;
        return DateTime::from_timestamp_millis(millis).ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format)
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(midnight.and_utc());
        }
    }

    Err(invalid())
}

/// `yyyy-MM-dd`, the form shown in the table and matched by the registration filter.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Long form, e.g. `March 14, 2023, 02:59:32 PM`.
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y, %I:%M:%S %p").to_string()
}
