//! Applies the ownership rules for categories on top of the stores.

use crate::{
    Error, TransactionType, UserID,
    category::{Category, CategoryForm, DEFAULT_CATEGORY_ICON, NewCategory},
    database_id::CategoryId,
    stores::{CategoryQuery, CategoryStore, TransactionStore},
};

/// Lists, creates, updates and deletes categories on behalf of a user.
///
/// Users can read system defaults and their own categories, but can only
/// modify their own.
#[derive(Debug, Clone)]
pub struct CategoryService<C, T> {
    categories: C,
    transactions: T,
}

impl<C, T> CategoryService<C, T>
where
    C: CategoryStore,
    T: TransactionStore,
{
    /// Create a service over a category store and the transaction store used
    /// to check whether a category is in use.
    pub fn new(categories: C, transactions: T) -> Self {
        Self {
            categories,
            transactions,
        }
    }

    /// The system defaults and the categories owned by `user_id`, ordered by
    /// type then name, optionally restricted to one type.
    pub fn list(
        &self,
        user_id: UserID,
        category_type: Option<TransactionType>,
    ) -> Result<Vec<Category>, Error> {
        self.categories.get_query(CategoryQuery {
            visible_to: Some(user_id),
            category_type,
        })
    }

    /// Get a category that `user_id` can see.
    ///
    /// Categories owned by other users are reported as [Error::NotFound].
    pub fn get(&self, user_id: UserID, category_id: CategoryId) -> Result<Category, Error> {
        let category = self.categories.get(category_id)?;

        if category.is_visible_to(user_id) {
            Ok(category)
        } else {
            Err(Error::NotFound)
        }
    }

    /// Create a category owned by `user_id`.
    pub fn create(&self, user_id: UserID, form: CategoryForm) -> Result<Category, Error> {
        let fields = form.validate()?;

        self.categories.create(NewCategory {
            name: fields.name,
            category_type: fields.category_type,
            icon: fields
                .icon
                .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_owned()),
            owner: Some(user_id),
        })
    }

    /// Overwrite the name and type of a category owned by `user_id`, and its
    /// icon if a non-empty one is given.
    pub fn update(
        &self,
        user_id: UserID,
        category_id: CategoryId,
        form: CategoryForm,
    ) -> Result<Category, Error> {
        let mut category = self.get_owned(user_id, category_id)?;
        let fields = form.validate()?;

        category.name = fields.name;
        category.category_type = fields.category_type;
        if let Some(icon) = fields.icon {
            category.icon = icon;
        }

        self.categories.update(&category)?;

        Ok(category)
    }

    /// Delete a category owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::CategoryInUse] if any transaction still references the
    /// category.
    pub fn delete(&self, user_id: UserID, category_id: CategoryId) -> Result<(), Error> {
        let category = self.get_owned(user_id, category_id)?;

        if self.transactions.count_by_category(category.id)? > 0 {
            return Err(Error::CategoryInUse);
        }

        self.categories.delete(category.id)
    }

    /// System defaults and other users' categories are reported as [Error::NotFound].
    fn get_owned(&self, user_id: UserID, category_id: CategoryId) -> Result<Category, Error> {
        let category = self.categories.get(category_id)?;

        if category.is_owned_by(user_id) {
            Ok(category)
        } else {
            Err(Error::NotFound)
        }
    }
}
