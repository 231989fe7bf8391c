//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    auth::{AuthConfig, AuthProvider},
    db::{initialize, seed_default_categories},
    pagination::PaginationConfig,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Registers users, checks passwords and verifies tokens.
    pub auth: AuthProvider<SQLiteUserStore>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to split listings into pages.
    pub pagination_config: PaginationConfig,

    /// The store for system default and user categories.
    pub category_store: SQLiteCategoryStore,

    /// The store for transactions and their aggregates.
    pub transaction_store: SQLiteTransactionStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models and seeding the system default categories.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        secret: &str,
        local_timezone: &str,
        auth_config: AuthConfig,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;
        seed_default_categories(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            auth: AuthProvider::new(
                SQLiteUserStore::new(connection.clone()),
                secret,
                auth_config,
            ),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
            category_store: SQLiteCategoryStore::new(connection.clone()),
            transaction_store: SQLiteTransactionStore::new(connection),
        })
    }
}
