//! Transaction types and the validation of client supplied transaction fields.

use serde::{Deserialize, Serialize, Serializer};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error, TransactionType, UserID,
    category::Category,
    database_id::{CategoryId, TransactionId},
};

/// Date format for transaction dates, e.g. "2024-01-31".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a date given either as "YYYY-MM-DD" or as an RFC 3339 date-time.
///
/// Only the date part of a date-time is kept.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is in neither format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

/// The text describing a transaction, between 1 and 255 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description(String);

impl Description {
    /// Create a description from `text` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDescription] if the trimmed text is empty or
    /// longer than 255 characters.
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();

        match text.graphemes(true).count() {
            1..=255 => Ok(Self(text.to_owned())),
            _ => Err(Error::InvalidDescription),
        }
    }

    /// Create a description without any validation.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check that `amount` is a finite number greater than zero.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount)
    }
}

/// An income or expense event, joined with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money, always positive. The type gives the direction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: Description,
    /// When the transaction happened.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The user that owns the transaction.
    #[serde(skip)]
    pub user_id: UserID,
    /// The category the transaction is assigned to.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The fields needed to insert or overwrite a transaction in a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: Description,
    pub date: Date,
    pub transaction_type: TransactionType,
    pub category_id: CategoryId,
    pub user_id: UserID,
}

/// The JSON body for creating or updating a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    pub amount: f64,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category_id: CategoryId,
}

impl TransactionForm {
    /// Validate the form fields and attach the owner.
    ///
    /// Whether the category may be used is checked by the caller.
    pub fn validate(self, user_id: UserID) -> Result<NewTransaction, Error> {
        Ok(NewTransaction {
            amount: validate_amount(self.amount)?,
            description: Description::new(&self.description)?,
            date: parse_date(&self.date)?,
            transaction_type: self.transaction_type.parse()?,
            category_id: self.category_id,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, TransactionType, UserID};

    use super::{Description, TransactionForm, parse_date, validate_amount};

    #[test]
    fn parse_plain_date() {
        assert_eq!(parse_date("2024-01-31"), Ok(date!(2024 - 01 - 31)));
    }

    #[test]
    fn parse_date_time_keeps_date() {
        assert_eq!(
            parse_date("2024-01-31T23:00:00Z"),
            Ok(date!(2024 - 01 - 31))
        );
    }

    #[test]
    fn parse_invalid_date_fails() {
        assert_eq!(
            parse_date("31/01/2024"),
            Err(Error::InvalidDate("31/01/2024".to_owned()))
        );
    }

    #[test]
    fn amount_must_be_positive_and_finite() {
        assert_eq!(validate_amount(0.01), Ok(0.01));
        assert_eq!(validate_amount(0.0), Err(Error::InvalidAmount));
        assert_eq!(validate_amount(-5.0), Err(Error::InvalidAmount));
        assert_eq!(validate_amount(f64::INFINITY), Err(Error::InvalidAmount));
        assert_eq!(validate_amount(f64::NAN), Err(Error::InvalidAmount));
    }

    #[test]
    fn description_is_trimmed_and_bounded() {
        assert_eq!(Description::new(" Lunch ").unwrap().as_ref(), "Lunch");
        assert_eq!(Description::new("   "), Err(Error::InvalidDescription));
        assert_eq!(
            Description::new(&"x".repeat(256)),
            Err(Error::InvalidDescription)
        );
        assert!(Description::new(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn form_deserializes_and_validates() {
        let form: TransactionForm = serde_json::from_str(
            r#"{"amount": 12.5, "description": "Lunch", "date": "2024-01-05",
                "type": "expense", "category_id": 3}"#,
        )
        .unwrap();

        let transaction = form.validate(UserID::new(7)).unwrap();

        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.date, date!(2024 - 01 - 05));
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.category_id, 3);
        assert_eq!(transaction.user_id, UserID::new(7));
    }

    #[test]
    fn form_with_bad_date_fails_validation() {
        let form: TransactionForm = serde_json::from_str(
            r#"{"amount": 1, "description": "x", "date": "yesterday",
                "type": "expense", "category_id": 3}"#,
        )
        .unwrap();

        assert_eq!(
            form.validate(UserID::new(1)),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }
}
