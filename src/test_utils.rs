//! Helpers shared by the unit tests.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    AppState, AuthConfig, PasswordHash,
    db::initialize,
    pagination::PaginationConfig,
    stores::{UserStore, sqlite::SQLiteUserStore},
    user::{NewUser, UserID, UserName},
};

/// An initialized in-memory database.
pub fn get_test_connection() -> Arc<Mutex<Connection>> {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();

    Arc::new(Mutex::new(connection))
}

/// Insert a user with `email` directly into the database.
pub fn create_test_user(connection: &Arc<Mutex<Connection>>, email: &str) -> UserID {
    SQLiteUserStore::new(connection.clone())
        .create(NewUser {
            name: UserName::new_unchecked("Test User"),
            email: EmailAddress::from_str(email).unwrap(),
            password_hash: PasswordHash::new_unchecked("not a real hash"),
        })
        .unwrap()
        .id
}

/// App state backed by a seeded in-memory database with fast password hashing.
pub fn get_test_app_state() -> AppState {
    AppState::new(
        Connection::open_in_memory().unwrap(),
        "42",
        "Etc/UTC",
        AuthConfig {
            token_duration: time::Duration::hours(1),
            password_hash_cost: 4,
        },
        PaginationConfig::default(),
    )
    .unwrap()
}
