//! Defines the app level error type and its conversion into JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination did not match a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request to a protected route did not include a bearer token.
    #[error("missing authorization token")]
    MissingToken,

    /// The bearer token could not be decoded, has been tampered with or has expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The token for a logged in user could not be created.
    ///
    /// The error string should only be logged on the server.
    #[error("could not create token: {0}")]
    TokenCreationError(String),

    /// The user's name was too short or too long.
    #[error("name must be between 2 and 100 characters")]
    InvalidUserName,

    /// The string could not be parsed as an email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The password is shorter than the minimum length.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// The email address is already used by another user.
    #[error("email already registered")]
    DuplicateEmail,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A category name was too short or too long after trimming whitespace.
    #[error("category name must be between 2 and 50 characters")]
    InvalidCategoryName,

    /// The type was neither `income` nor `expense`.
    #[error("invalid type \"{0}\", expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A transaction description was empty or too long after trimming whitespace.
    #[error("description must be between 1 and 255 characters")]
    InvalidDescription,

    /// A transaction amount was zero, negative or not a finite number.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The category ID used for a transaction does not refer to a category
    /// the user is allowed to use.
    #[error("invalid category")]
    InvalidCategory,

    /// The string could not be parsed as a date.
    #[error("invalid date \"{0}\", expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The year and month do not describe a valid calendar month.
    #[error("invalid month {month} of year {year}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month, expected to be in the range 1-12.
        month: u8,
    },

    /// The request body, path or query string could not be parsed, e.g. a
    /// JSON field is missing or an ID is not a number.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The category still has transactions that reference it.
    ///
    /// The client should reassign or delete those transactions first.
    #[error("cannot delete a category that is being used in transactions")]
    CategoryInUse,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A request or response body could not be buffered for logging.
    #[error("could not read body: {0}")]
    BodyReadError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidUserName
            | Error::InvalidEmail(_)
            | Error::PasswordTooShort
            | Error::InvalidCategoryName
            | Error::InvalidTransactionType(_)
            | Error::InvalidDescription
            | Error::InvalidAmount
            | Error::InvalidCategory
            | Error::InvalidDate(_)
            | Error::InvalidMonth { .. }
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::DuplicateEmail | Error::CategoryInUse => StatusCode::CONFLICT,
            Error::TokenCreationError(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezone(_)
            | Error::BodyReadError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
