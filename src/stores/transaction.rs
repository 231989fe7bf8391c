//! Defines the transaction store trait and the aggregates it computes.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error, TransactionType, UserID,
    category::CategoryName,
    database_id::{CategoryId, TransactionId},
    transaction::{NewTransaction, Transaction},
};

/// Handles the creation, retrieval and aggregation of transactions.
///
/// Deleted transactions are excluded from every query and aggregate.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction, joined with its category, from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`,
    /// newest first.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching the filters in `query`, ignoring
    /// `limit` and `offset`.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error>;

    /// Count the transactions that reference a category.
    fn count_by_category(&self, category_id: CategoryId) -> Result<u64, Error>;

    /// Overwrite every field of an existing transaction.
    ///
    /// Returns [Error::NotFound] if the transaction does not exist.
    fn update(&self, id: TransactionId, transaction: NewTransaction) -> Result<(), Error>;

    /// Mark a transaction as deleted.
    ///
    /// Returns [Error::NotFound] if the transaction does not exist or has
    /// already been deleted.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Sum the income and expenses of a user within `date_range`, or over
    /// all time if `date_range` is `None`.
    fn totals(
        &self,
        user_id: UserID,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<Totals, Error>;

    /// Sum the transactions of a user per category, largest total first.
    ///
    /// Ties are broken by category ID. At most `limit` categories are
    /// returned if a limit is given.
    fn totals_by_category(
        &self,
        user_id: UserID,
        date_range: Option<RangeInclusive<Date>>,
        limit: Option<u64>,
    ) -> Result<Vec<CategoryTotal>, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    /// Only include transactions owned by this user.
    pub user_id: UserID,
    /// Include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Include transactions on or before this date.
    pub end_date: Option<Date>,
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions in this category.
    pub category_id: Option<CategoryId>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
    /// Skip the first N transactions. Only used together with `limit`.
    pub offset: u64,
}

impl TransactionQuery {
    /// A query for every transaction owned by `user_id`.
    pub fn for_user(user_id: UserID) -> Self {
        Self {
            user_id,
            start_date: None,
            end_date: None,
            transaction_type: None,
            category_id: None,
            limit: None,
            offset: 0,
        }
    }
}

/// The sums of a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// The number of transactions of either type.
    pub count: u64,
}

/// The sum of the transactions in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: CategoryName,
    pub category_icon: String,
    /// The sum of the amounts, regardless of transaction type.
    pub total_amount: f64,
    pub count: u64,
}
