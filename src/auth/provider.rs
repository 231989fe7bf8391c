//! Registers users, checks their credentials and issues bearer tokens.

use std::str::FromStr;

use email_address::EmailAddress;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::{
    Error, PasswordHash, UserID, ValidatedPassword,
    auth::token::{TokenKeys, decode_token, encode_token},
    stores::UserStore,
    user::{NewUser, User, UserName},
};

/// Settings for passwords and tokens.
#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// How long a token stays valid after log in.
    pub token_duration: Duration,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_duration: Duration::hours(24),
            password_hash_cost: PasswordHash::DEFAULT_COST,
        }
    }
}

/// The JSON body for registering a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The JSON body for logging in.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInForm {
    pub email: String,
    pub password: String,
}

/// Verifies who a user is.
#[derive(Clone)]
pub struct AuthProvider<U> {
    users: U,
    keys: TokenKeys,
    config: AuthConfig,
}

impl<U> AuthProvider<U>
where
    U: UserStore,
{
    /// Create a provider that signs tokens with `secret`.
    pub fn new(users: U, secret: &str, config: AuthConfig) -> Self {
        Self {
            users,
            keys: TokenKeys::new(secret),
            config,
        }
    }

    /// Validate the form and create a new user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad name, email or password, or
    /// [Error::DuplicateEmail] if the email is already registered.
    pub fn register(&self, form: RegisterForm) -> Result<User, Error> {
        let name = UserName::new(&form.name)?;
        let email = EmailAddress::from_str(form.email.trim())
            .map_err(|error| Error::InvalidEmail(error.to_string()))?;
        let password = ValidatedPassword::new(&form.password)?;
        let password_hash = PasswordHash::new(password, self.config.password_hash_cost)?;

        self.users.create(NewUser {
            name,
            email,
            password_hash,
        })
    }

    /// Check the email and password and issue a token for the user.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCredentials] if the email is not registered or
    /// the password is wrong.
    pub fn log_in(&self, form: LogInForm) -> Result<(User, String), Error> {
        let email =
            EmailAddress::from_str(form.email.trim()).map_err(|_| Error::InvalidCredentials)?;

        let user = match self.users.get_by_email(&email) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        };

        let password_is_correct = user.password_hash.verify(&form.password).map_err(|error| {
            tracing::error!("Error verifying password: {error}");
            Error::HashingError(error.to_string())
        })?;

        if !password_is_correct {
            return Err(Error::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;

        Ok((user, token))
    }

    /// Create a token for `user_id` that expires after the configured duration.
    pub fn issue_token(&self, user_id: UserID) -> Result<String, Error> {
        encode_token(
            user_id,
            OffsetDateTime::now_utc(),
            self.config.token_duration,
            &self.keys,
        )
    }

    /// Get the ID of the user a valid token was issued to.
    pub fn authenticate(&self, token: &str) -> Result<UserID, Error> {
        decode_token(token, &self.keys).map(|claims| claims.user_id)
    }

    /// Get the profile of a user.
    pub fn get_user(&self, user_id: UserID) -> Result<User, Error> {
        self.users.get(user_id)
    }
}
