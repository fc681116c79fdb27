//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::ThemeMode;
use crate::core::action::{Action, update};
use crate::core::state::App;
use crate::core::user::{RawUser, UserRecord, parse_register_at};
use crate::loader::{LoadError, UserSource};

/// A source that answers every fetch with the same canned result.
pub struct StaticSource {
    result: Result<Vec<RawUser>, LoadError>,
}

impl StaticSource {
    pub fn ok(users: Vec<RawUser>) -> Self {
        Self { result: Ok(users) }
    }

    pub fn err(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl UserSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_users(&self) -> Result<Vec<RawUser>, LoadError> {
        self.result.clone()
    }
}

pub fn raw_user(id: &str, register_at: &str) -> RawUser {
    RawUser {
        id: id.to_string(),
        name: format!("User {id}"),
        balance: 100.0,
        email: format!("user{id}@example.com"),
        register_at: register_at.to_string(),
        active: true,
    }
}

pub fn user(
    id: &str,
    name: &str,
    balance: f64,
    email: &str,
    register_at: &str,
    active: bool,
) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        balance,
        email: email.to_string(),
        register_at: parse_register_at(register_at).unwrap(),
        active,
    }
}

/// `n` users with ids `user-1..=user-n`, distinct balances and dates.
pub fn users_numbered(n: usize) -> Vec<UserRecord> {
    (1..=n)
        .map(|i| {
            user(
                &format!("user-{i}"),
                &format!("User {i}"),
                (i * 10) as f64,
                &format!("user{i}@example.com"),
                &format!("2020-01-01T00:00:{:02}Z", i % 60),
                i % 2 == 0,
            )
        })
        .collect()
}

/// Creates a test App with default settings and nothing loaded.
pub fn test_app() -> App {
    App::new(ThemeMode::Light, 10)
}

/// Creates a test App that has completed one load of `users_numbered(n)`.
pub fn loaded_app(n: usize) -> App {
    let mut app = test_app();
    update(&mut app, Action::Load);
    update(
        &mut app,
        Action::LoadFinished {
            generation: 1,
            result: Ok(users_numbered(n)),
        },
    );
    app
}
