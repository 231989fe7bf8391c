//! Category types and the validation of client supplied category fields.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, TransactionType, UserID, database_id::CategoryId};

/// The icon given to categories created without one.
pub const DEFAULT_CATEGORY_ICON: &str = "📦";

/// The name of a category, between 2 and 50 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategoryName] if the trimmed name has fewer than 2
    /// or more than 50 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        match name.graphemes(true).count() {
            2..=50 => Ok(Self(name.to_owned())),
            _ => Err(Error::InvalidCategoryName),
        }
    }

    /// Create a category name without any validation.
    ///
    /// The caller should ensure that `name` is a valid category name.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A label for grouping transactions.
///
/// A category without an owner is a system default that every user can see
/// but nobody can modify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: CategoryName,
    /// Whether the category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// An emoji shown next to the category name.
    pub icon: String,
    /// The user that created the category, `None` for system defaults.
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserID>,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Category {
    /// Whether the category is a system default shared by all users.
    pub fn is_system_default(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether `user_id` may read and use the category.
    pub fn is_visible_to(&self, user_id: UserID) -> bool {
        match self.owner {
            None => true,
            Some(owner) => owner == user_id,
        }
    }

    /// Whether `user_id` may modify or delete the category.
    pub fn is_owned_by(&self, user_id: UserID) -> bool {
        self.owner == Some(user_id)
    }
}

/// The fields needed to insert a category into a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub category_type: TransactionType,
    pub icon: String,
    pub owner: Option<UserID>,
}

/// The JSON body for creating or updating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Category fields that have passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCategoryFields {
    pub name: CategoryName,
    pub category_type: TransactionType,
    /// `None` when the client sent no icon or an empty one.
    pub icon: Option<String>,
}

impl CategoryForm {
    /// Check the name and type and normalise the icon.
    pub fn validate(self) -> Result<ValidCategoryFields, Error> {
        let name = CategoryName::new(&self.name)?;
        let category_type = self.category_type.parse()?;
        let icon = self
            .icon
            .map(|icon| icon.trim().to_owned())
            .filter(|icon| !icon.is_empty());

        Ok(ValidCategoryFields {
            name,
            category_type,
            icon,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Error, TransactionType, UserID};

    use super::{Category, CategoryForm, CategoryName};

    fn category_with_owner(owner: Option<UserID>) -> Category {
        Category {
            id: 1,
            name: CategoryName::new_unchecked("Food"),
            category_type: TransactionType::Expense,
            icon: "🍔".to_owned(),
            owner,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
        }
    }

    #[test]
    fn category_name_is_trimmed() {
        let name = CategoryName::new("  Rent  ").unwrap();

        assert_eq!(name.as_ref(), "Rent");
    }

    #[test]
    fn category_name_rejects_too_short() {
        assert_eq!(CategoryName::new("  a "), Err(Error::InvalidCategoryName));
    }

    #[test]
    fn category_name_rejects_too_long() {
        assert_eq!(
            CategoryName::new(&"a".repeat(51)),
            Err(Error::InvalidCategoryName)
        );
    }

    #[test]
    fn category_name_counts_emoji_as_single_characters() {
        assert!(CategoryName::new("🍔🍕").is_ok());
    }

    #[test]
    fn system_default_is_visible_to_everyone_but_owned_by_nobody() {
        let category = category_with_owner(None);

        assert!(category.is_system_default());
        assert!(category.is_visible_to(UserID::new(1)));
        assert!(!category.is_owned_by(UserID::new(1)));
    }

    #[test]
    fn user_category_is_only_visible_to_owner() {
        let category = category_with_owner(Some(UserID::new(1)));

        assert!(category.is_visible_to(UserID::new(1)));
        assert!(category.is_owned_by(UserID::new(1)));
        assert!(!category.is_visible_to(UserID::new(2)));
        assert!(!category.is_owned_by(UserID::new(2)));
    }

    #[test]
    fn system_default_serializes_without_user_id() {
        let json = serde_json::to_value(category_with_owner(None)).unwrap();

        assert_eq!(json["type"], "expense");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn form_with_blank_icon_has_no_icon() {
        let form = CategoryForm {
            name: "Groceries".to_owned(),
            category_type: "expense".to_owned(),
            icon: Some("  ".to_owned()),
        };

        let fields = form.validate().unwrap();

        assert_eq!(fields.icon, None);
        assert_eq!(fields.category_type, TransactionType::Expense);
    }

    #[test]
    fn form_with_invalid_type_fails() {
        let form = CategoryForm {
            name: "Groceries".to_owned(),
            category_type: "savings".to_owned(),
            icon: None,
        };

        assert_eq!(
            form.validate(),
            Err(Error::InvalidTransactionType("savings".to_owned()))
        );
    }
}
