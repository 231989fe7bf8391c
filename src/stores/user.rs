//! Defines the user store trait.

use email_address::EmailAddress;

use crate::{
    Error,
    user::{NewUser, User, UserID},
};

/// Handles the creation and retrieval of [User] objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateEmail] if the email is already registered.
    fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;
}
