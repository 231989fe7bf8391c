//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    category::{Category, CategoryName, NewCategory},
    database_id::CategoryId,
    db::{CreateTable, MapRow, lock_connection},
    stores::{CategoryQuery, CategoryStore},
};

/// Creates, retrieves, updates and soft deletes categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&self, category: NewCategory) -> Result<Category, Error> {
        let created_at = OffsetDateTime::now_utc();

        lock_connection(&self.connection)?
            .prepare(
                "INSERT INTO category (name, type, icon, user_id, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                RETURNING id, name, type, icon, user_id, created_at",
            )?
            .query_row(
                (
                    category.name.as_ref(),
                    category.category_type,
                    &category.icon,
                    category.owner.map(|owner| owner.as_i64()),
                    created_at,
                ),
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Retrieve the category with `category_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist or was deleted.
    fn get(&self, category_id: CategoryId) -> Result<Category, Error> {
        lock_connection(&self.connection)?
            .prepare(
                "SELECT id, name, type, icon, user_id, created_at FROM category
                WHERE id = :id AND deleted_at IS NULL",
            )?
            .query_row(&[(":id", &category_id)], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve the categories matching `query`.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_query(&self, query: CategoryQuery) -> Result<Vec<Category>, Error> {
        let mut where_clause_parts = vec!["deleted_at IS NULL".to_owned()];
        let mut query_parameters = vec![];

        if let Some(user_id) = query.visible_to {
            query_parameters.push(Value::Integer(user_id.as_i64()));
            where_clause_parts.push(format!(
                "(user_id IS NULL OR user_id = ?{})",
                query_parameters.len()
            ));
        }

        if let Some(category_type) = query.category_type {
            query_parameters.push(Value::Text(category_type.as_str().to_owned()));
            where_clause_parts.push(format!("type = ?{}", query_parameters.len()));
        }

        let query_string = format!(
            "SELECT id, name, type, icon, user_id, created_at FROM category
            WHERE {}
            ORDER BY type ASC, name ASC, id ASC",
            where_clause_parts.join(" AND ")
        );

        lock_connection(&self.connection)?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn update(&self, category: &Category) -> Result<(), Error> {
        let rows_affected = lock_connection(&self.connection)?.execute(
            "UPDATE category SET name = ?1, type = ?2, icon = ?3
            WHERE id = ?4 AND deleted_at IS NULL",
            (
                category.name.as_ref(),
                category.category_type,
                &category.icon,
                category.id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn delete(&self, category_id: CategoryId) -> Result<(), Error> {
        let rows_affected = lock_connection(&self.connection)?.execute(
            "UPDATE category SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            (OffsetDateTime::now_utc(), category_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                icon TEXT NOT NULL DEFAULT '📦',
                user_id INTEGER,
                created_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let raw_name: String = row.get(offset + 1)?;
        let category_type = row.get(offset + 2)?;
        let icon = row.get(offset + 3)?;
        let raw_owner: Option<i64> = row.get(offset + 4)?;
        let created_at = row.get(offset + 5)?;

        Ok(Self::ReturnType {
            id,
            name: CategoryName::new_unchecked(&raw_name),
            category_type,
            icon,
            owner: raw_owner.map(UserID::new),
            created_at,
        })
    }
}
