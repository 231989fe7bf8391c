//! Users of the application and their validated fields.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The display name of a user, between 2 and 100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a user name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidUserName] if the trimmed name has fewer than 2
    /// or more than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        match name.graphemes(true).count() {
            2..=100 => Ok(Self(name.to_owned())),
            _ => Err(Error::InvalidUserName),
        }
    }

    /// Create a user name without any validation.
    ///
    /// The caller should ensure that `name` is a valid user name.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registered user of the application.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: UserName,
    /// The email address the user logs in with.
    pub email: EmailAddress,
    /// The user's password hash.
    #[serde(skip)]
    pub password_hash: PasswordHash,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated fields needed to register a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: UserName,
    /// The email address the user logs in with.
    pub email: EmailAddress,
    /// The user's hashed password.
    pub password_hash: PasswordHash,
}
