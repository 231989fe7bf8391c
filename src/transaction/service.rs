//! Applies the ownership rules for transactions on top of the stores.

use time::Date;

use crate::{
    Error, TransactionType, UserID,
    database_id::{CategoryId, TransactionId},
    pagination::{Page, PageRequest},
    stores::{CategoryStore, TransactionQuery, TransactionStore},
    transaction::{NewTransaction, Transaction, TransactionForm},
};

/// The optional filters for listing transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Include transactions on or before this date.
    pub end_date: Option<Date>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<CategoryId>,
}

/// Lists, creates, updates and deletes the transactions of a user.
#[derive(Debug, Clone)]
pub struct TransactionService<T, C> {
    transactions: T,
    categories: C,
}

impl<T, C> TransactionService<T, C>
where
    T: TransactionStore,
    C: CategoryStore,
{
    /// Create a service over a transaction store and the category store used
    /// to check that categories may be used.
    pub fn new(transactions: T, categories: C) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// One page of the transactions of `user_id` that match `filter`, newest first.
    pub fn list(
        &self,
        user_id: UserID,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<Transaction>, Error> {
        let query = TransactionQuery {
            user_id,
            start_date: filter.start_date,
            end_date: filter.end_date,
            transaction_type: filter.transaction_type,
            category_id: filter.category_id,
            limit: Some(page.limit),
            offset: page.offset(),
        };

        let total = self.transactions.count(&query)?;
        let data = self.transactions.get_query(&query)?;

        Ok(Page::new(data, page, total))
    }

    /// Get a transaction owned by `user_id`.
    ///
    /// Transactions owned by other users are reported as [Error::NotFound].
    pub fn get(&self, user_id: UserID, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self.transactions.get(id)?;

        if transaction.user_id == user_id {
            Ok(transaction)
        } else {
            Err(Error::NotFound)
        }
    }

    /// Record a new transaction for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategory] if the category is not visible to the user.
    pub fn create(&self, user_id: UserID, form: TransactionForm) -> Result<Transaction, Error> {
        let transaction = form.validate(user_id)?;
        self.check_category(&transaction)?;

        self.transactions.create(transaction)
    }

    /// Overwrite every field of a transaction owned by `user_id`.
    pub fn update(
        &self,
        user_id: UserID,
        id: TransactionId,
        form: TransactionForm,
    ) -> Result<Transaction, Error> {
        self.get(user_id, id)?;
        let transaction = form.validate(user_id)?;
        self.check_category(&transaction)?;

        self.transactions.update(id, transaction)?;
        self.transactions.get(id)
    }

    /// Delete a transaction owned by `user_id`.
    pub fn delete(&self, user_id: UserID, id: TransactionId) -> Result<(), Error> {
        self.get(user_id, id)?;

        self.transactions.delete(id)
    }

    fn check_category(&self, transaction: &NewTransaction) -> Result<(), Error> {
        match self.categories.get(transaction.category_id) {
            Ok(category) if category.is_visible_to(transaction.user_id) => Ok(()),
            Ok(_) | Err(Error::NotFound) => Err(Error::InvalidCategory),
            Err(error) => Err(error),
        }
    }
}
