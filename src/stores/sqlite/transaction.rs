//! Implements a SQLite backed transaction store.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    category::CategoryName,
    database_id::{CategoryId, TransactionId},
    db::{CreateTable, MapRow, lock_connection},
    stores::{
        CategoryTotal, Totals, TransactionQuery, TransactionStore, sqlite::SQLiteCategoryStore,
    },
    transaction::{Description, NewTransaction, Transaction},
};

/// The columns read by [SQLiteTransactionStore::map_row], transaction first
/// and then its category.
const SELECT_JOINED: &str = "SELECT t.id, t.amount, t.description, t.date, t.type, t.user_id, \
    t.created_at, c.id, c.name, c.type, c.icon, c.user_id, c.created_at \
    FROM \"transaction\" t INNER JOIN category c ON c.id = t.category_id";

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

/// Builds the WHERE clause shared by listing and counting.
fn filter_clause(query: &TransactionQuery) -> (String, Vec<Value>) {
    let mut where_clause_parts = vec!["t.deleted_at IS NULL".to_owned()];
    let mut query_parameters = vec![Value::Integer(query.user_id.as_i64())];
    where_clause_parts.push("t.user_id = ?1".to_owned());

    if let Some(start_date) = query.start_date {
        query_parameters.push(Value::Text(start_date.to_string()));
        where_clause_parts.push(format!("t.date >= ?{}", query_parameters.len()));
    }

    if let Some(end_date) = query.end_date {
        query_parameters.push(Value::Text(end_date.to_string()));
        where_clause_parts.push(format!("t.date <= ?{}", query_parameters.len()));
    }

    if let Some(transaction_type) = query.transaction_type {
        query_parameters.push(Value::Text(transaction_type.as_str().to_owned()));
        where_clause_parts.push(format!("t.type = ?{}", query_parameters.len()));
    }

    if let Some(category_id) = query.category_id {
        query_parameters.push(Value::Integer(category_id));
        where_clause_parts.push(format!("t.category_id = ?{}", query_parameters.len()));
    }

    (
        String::from("WHERE ") + &where_clause_parts.join(" AND "),
        query_parameters,
    )
}

/// Builds the WHERE clause for the aggregates of one user's transactions.
fn aggregate_clause(
    user_id: UserID,
    date_range: Option<RangeInclusive<Date>>,
) -> (String, Vec<Value>) {
    let mut query = TransactionQuery::for_user(user_id);

    if let Some(date_range) = date_range {
        query.start_date = Some(*date_range.start());
        query.end_date = Some(*date_range.end());
    }

    filter_clause(&query)
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if `category_id` does not refer to a category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let id = {
            let connection = lock_connection(&self.connection)?;

            connection
                .prepare(
                    "INSERT INTO \"transaction\"
                    (amount, description, date, type, user_id, category_id, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    RETURNING id",
                )?
                .query_row(
                    (
                        transaction.amount,
                        transaction.description.as_ref(),
                        transaction.date,
                        transaction.transaction_type,
                        transaction.user_id.as_i64(),
                        transaction.category_id,
                        OffsetDateTime::now_utc(),
                    ),
                    |row| row.get::<_, TransactionId>(0),
                )
                .map_err(map_foreign_key_error)?
        };

        self.get(id)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a live transaction,
    /// - [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        lock_connection(&self.connection)?
            .prepare(&format!(
                "{SELECT_JOINED} WHERE t.id = :id AND t.deleted_at IS NULL"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let (where_clause, query_parameters) = filter_clause(query);
        let mut query_string_parts = vec![
            SELECT_JOINED.to_owned(),
            where_clause,
            "ORDER BY t.date DESC, t.created_at DESC, t.id DESC".to_owned(),
        ];

        if let Some(limit) = query.limit {
            let offset = query.offset.min(i64::MAX as u64);
            query_string_parts.push(format!("LIMIT {limit} OFFSET {offset}"));
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        lock_connection(&self.connection)?
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let (where_clause, query_parameters) = filter_clause(query);
        let query_string = format!("SELECT COUNT(t.id) FROM \"transaction\" t {where_clause}");

        lock_connection(&self.connection)?
            .query_row(
                &query_string,
                params_from_iter(query_parameters.iter()),
                |row| get_count(row, 0),
            )
            .map_err(|error| error.into())
    }

    fn count_by_category(&self, category_id: CategoryId) -> Result<u64, Error> {
        lock_connection(&self.connection)?
            .query_row(
                "SELECT COUNT(id) FROM \"transaction\"
                WHERE category_id = ?1 AND deleted_at IS NULL",
                (category_id,),
                |row| get_count(row, 0),
            )
            .map_err(|error| error.into())
    }

    fn update(&self, id: TransactionId, transaction: NewTransaction) -> Result<(), Error> {
        let rows_affected = lock_connection(&self.connection)?
            .execute(
                "UPDATE \"transaction\"
                SET amount = ?1, description = ?2, date = ?3, type = ?4, category_id = ?5
                WHERE id = ?6 AND deleted_at IS NULL",
                (
                    transaction.amount,
                    transaction.description.as_ref(),
                    transaction.date,
                    transaction.transaction_type,
                    transaction.category_id,
                    id,
                ),
            )
            .map_err(map_foreign_key_error)?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = lock_connection(&self.connection)?.execute(
            "UPDATE \"transaction\" SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            (OffsetDateTime::now_utc(), id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn totals(
        &self,
        user_id: UserID,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Totals, Error> {
        let (where_clause, query_parameters) = aggregate_clause(user_id, date_range);
        let query_string = format!(
            "SELECT
                COALESCE(SUM(CASE WHEN t.type = 'income' THEN t.amount END), 0.0),
                COALESCE(SUM(CASE WHEN t.type = 'expense' THEN t.amount END), 0.0),
                COUNT(t.id)
            FROM \"transaction\" t {where_clause}"
        );

        lock_connection(&self.connection)?
            .query_row(
                &query_string,
                params_from_iter(query_parameters.iter()),
                |row| {
                    Ok(Totals {
                        income: row.get(0)?,
                        expense: row.get(1)?,
                        count: get_count(row, 2)?,
                    })
                },
            )
            .map_err(|error| error.into())
    }

    fn totals_by_category(
        &self,
        user_id: UserID,
        date_range: Option<RangeInclusive<Date>>,
        limit: Option<u64>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let (where_clause, query_parameters) = aggregate_clause(user_id, date_range);
        let mut query_string = format!(
            "SELECT c.id, c.name, c.icon, SUM(t.amount) AS total_amount, COUNT(t.id)
            FROM \"transaction\" t INNER JOIN category c ON c.id = t.category_id
            {where_clause}
            GROUP BY c.id, c.name, c.icon
            ORDER BY total_amount DESC, c.id ASC"
        );

        if let Some(limit) = limit {
            query_string.push_str(&format!(" LIMIT {limit}"));
        }

        lock_connection(&self.connection)?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), |row| {
                let raw_name: String = row.get(1)?;

                Ok(CategoryTotal {
                    category_id: row.get(0)?,
                    category_name: CategoryName::new_unchecked(&raw_name),
                    category_icon: row.get(2)?,
                    total_amount: row.get(3)?,
                    count: get_count(row, 4)?,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(|error| error.into()))
            .collect()
    }
}

/// Read a `COUNT(..)` column, which SQLite stores as a signed integer.
fn get_count(row: &Row, index: usize) -> Result<u64, rusqlite::Error> {
    let count: i64 = row.get(index)?;

    u64::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, count))
}

/// Code 787 occurs when a FOREIGN KEY constraint failed, which for
/// transactions means the category does not exist.
fn map_foreign_key_error(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
            Error::InvalidCategory
        }
        error => error.into(),
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount REAL NOT NULL CHECK (amount > 0),
                    description TEXT NOT NULL,
                    date TEXT NOT NULL,
                    type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                    user_id INTEGER NOT NULL,
                    category_id INTEGER NOT NULL,
                    created_at TEXT NOT NULL,
                    deleted_at TEXT,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE,
                    FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE
                );

            CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);
            CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);",
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let raw_description: String = row.get(offset + 2)?;
        let date = row.get(offset + 3)?;
        let transaction_type = row.get(offset + 4)?;
        let raw_user_id = row.get(offset + 5)?;
        let created_at = row.get(offset + 6)?;
        let category = SQLiteCategoryStore::map_row_with_offset(row, offset + 7)?;

        Ok(Self::ReturnType {
            id,
            amount,
            description: Description::new_unchecked(&raw_description),
            date,
            transaction_type,
            user_id: UserID::new(raw_user_id),
            category,
            created_at,
        })
    }
}
