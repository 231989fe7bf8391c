//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash,
    db::{CreateTable, MapRow, lock_connection},
    stores::UserStore,
    user::{NewUser, User, UserID, UserName},
};

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns a [Error::DuplicateEmail] if the email is taken, [Error::DatabaseLockError]
    /// if the lock is poisoned or a [Error::SqlError] if an SQL related error occurred.
    fn create(&self, user: NewUser) -> Result<User, Error> {
        let created_at = OffsetDateTime::now_utc();

        lock_connection(&self.connection)?
            .prepare(
                "INSERT INTO user (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)
                RETURNING id, name, email, password, created_at",
            )?
            .query_row(
                (
                    user.name.as_ref(),
                    user.email.as_str(),
                    user.password_hash.as_ref(),
                    created_at,
                ),
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `id`, or return [Error::NotFound] if such user does not exist.
    fn get(&self, id: UserID) -> Result<User, Error> {
        lock_connection(&self.connection)?
            .prepare(
                "SELECT id, name, email, password, created_at FROM user
                WHERE id = :id AND deleted_at IS NULL",
            )?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `email` address, or return [Error::NotFound] if such user does not exist.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        lock_connection(&self.connection)?
            .prepare(
                "SELECT id, name, email, password, created_at FROM user
                WHERE email = :email AND deleted_at IS NULL",
            )?
            .query_row(&[(":email", email.as_str())], Self::map_row)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    deleted_at TEXT
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let raw_name: String = row.get(offset + 1)?;
        let raw_email: String = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;
        let created_at = row.get(offset + 4)?;

        Ok(User {
            id: UserID::new(raw_id),
            name: UserName::new_unchecked(&raw_name),
            email: EmailAddress::new_unchecked(raw_email),
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
            created_at,
        })
    }
}

#[cfg(test)]
mod user_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash,
        db::initialize,
        user::{NewUser, UserID, UserName},
    };

    use super::{SQLiteUserStore, UserStore};

    fn get_store() -> SQLiteUserStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(conn)))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new_unchecked("Alice"),
            email: EmailAddress::from_str(email).unwrap(),
            password_hash: PasswordHash::new_unchecked("hunter2"),
        }
    }

    #[test]
    fn insert_user_succeeds() {
        let store = get_store();
        let user = new_user("hello@world.com");

        let inserted_user = store.create(user.clone()).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.name, user.name);
        assert_eq!(inserted_user.email, user.email);
        assert_eq!(inserted_user.password_hash, user.password_hash);
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let store = get_store();
        store.create(new_user("hello@world.com")).unwrap();

        assert_eq!(
            store.create(new_user("hello@world.com")),
            Err(Error::DuplicateEmail)
        );
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let store = get_store();

        assert_eq!(store.get(UserID::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let store = get_store();
        let test_user = store.create(new_user("foo@bar.baz")).unwrap();

        let retrieved_user = store.get(test_user.id).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_fails_with_non_existent_email() {
        let store = get_store();
        let email = EmailAddress::from_str("notavalidemail@foo.bar").unwrap();

        assert_eq!(store.get_by_email(&email), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_email() {
        let store = get_store();
        let test_user = store.create(new_user("foo@bar.baz")).unwrap();

        let retrieved_user = store.get_by_email(&test_user.email).unwrap();

        assert_eq!(retrieved_user, test_user);
    }
}
