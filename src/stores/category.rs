//! Defines the category store trait.

use crate::{
    Error, TransactionType, UserID,
    category::{Category, NewCategory},
    database_id::CategoryId,
};

/// Creates, retrieves, updates and soft deletes categories.
///
/// Deleted categories are never returned.
pub trait CategoryStore {
    /// Create a new category and add it the store.
    fn create(&self, category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID, regardless of who owns it.
    fn get(&self, category_id: CategoryId) -> Result<Category, Error>;

    /// Get the categories that match `query`, ordered by type then name.
    fn get_query(&self, query: CategoryQuery) -> Result<Vec<Category>, Error>;

    /// Overwrite the name, type and icon of an existing category.
    ///
    /// Returns [Error::NotFound] if the category does not exist.
    fn update(&self, category: &Category) -> Result<(), Error>;

    /// Mark a category as deleted.
    ///
    /// Returns [Error::NotFound] if the category does not exist or has
    /// already been deleted.
    fn delete(&self, category_id: CategoryId) -> Result<(), Error>;
}

/// Defines how categories should be fetched from [CategoryStore::get_query].
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryQuery {
    /// Only include system defaults and the categories owned by this user.
    pub visible_to: Option<UserID>,
    /// Only include categories of this type.
    pub category_type: Option<TransactionType>,
}
