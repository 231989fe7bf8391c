/*! This module defines the traits shared by the SQLite stores, creates the
application's tables and seeds the system default categories. */

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, TransactionType,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// columns the implementation reads, in the order it reads them.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type.
    ///
    /// The `offset` indicates which column the row should be read from.
    /// This is useful in cases where tables have been joined and you want to construct two different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Acquire the database lock, logging and converting a poisoned lock into
/// [Error::DatabaseLockError].
pub(crate) fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// Create the tables for the domain models if they do not exist.
///
/// Foreign key enforcement is switched on for `connection`.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    SQLiteUserStore::create_table(connection)?;
    SQLiteCategoryStore::create_table(connection)?;
    SQLiteTransactionStore::create_table(connection)?;

    Ok(())
}

/// The categories every user can see: name, type and icon.
pub const DEFAULT_CATEGORIES: [(&str, TransactionType, &str); 13] = [
    ("Food & Dining", TransactionType::Expense, "🍔"),
    ("Transportation", TransactionType::Expense, "🚗"),
    ("Shopping", TransactionType::Expense, "🛍️"),
    ("Entertainment", TransactionType::Expense, "🎬"),
    ("Bills & Utilities", TransactionType::Expense, "💡"),
    ("Healthcare", TransactionType::Expense, "🏥"),
    ("Education", TransactionType::Expense, "📚"),
    ("Salary", TransactionType::Income, "💰"),
    ("Freelance", TransactionType::Income, "💼"),
    ("Investment", TransactionType::Income, "📈"),
    ("Gift", TransactionType::Income, "🎁"),
    ("Other Income", TransactionType::Income, "💵"),
    ("Other Expense", TransactionType::Expense, "📦"),
];

/// Insert the [DEFAULT_CATEGORIES] that are not in the database yet.
///
/// Returns the number of categories that were inserted, so calling this on
/// an already seeded database returns zero.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn seed_default_categories(connection: &Connection) -> Result<usize, Error> {
    let mut statement = connection.prepare(
        "INSERT INTO category (name, type, icon, user_id, created_at)
        SELECT ?1, ?2, ?3, NULL, ?4
        WHERE NOT EXISTS (
            SELECT 1 FROM category WHERE name = ?1 AND user_id IS NULL AND deleted_at IS NULL
        )",
    )?;

    let now = OffsetDateTime::now_utc();
    let mut inserted = 0;

    for (name, category_type, icon) in DEFAULT_CATEGORIES {
        let rows = statement.execute((name, category_type, icon, now))?;

        if rows > 0 {
            tracing::debug!("Seeded default category {icon} {name}");
        }

        inserted += rows;
    }

    if inserted > 0 {
        tracing::info!("Seeded {inserted} default categories");
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{DEFAULT_CATEGORIES, initialize, seed_default_categories};

    fn get_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = get_connection();

        assert!(initialize(&connection).is_ok());
    }

    #[test]
    fn seed_inserts_all_default_categories() {
        let connection = get_connection();

        let inserted = seed_default_categories(&connection).unwrap();

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(id) FROM category WHERE user_id IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(inserted, DEFAULT_CATEGORIES.len());
        assert_eq!(count, DEFAULT_CATEGORIES.len() as i64);
    }

    #[test]
    fn seed_twice_does_not_duplicate() {
        let connection = get_connection();
        seed_default_categories(&connection).unwrap();

        let inserted = seed_default_categories(&connection).unwrap();

        assert_eq!(inserted, 0);
    }
}
