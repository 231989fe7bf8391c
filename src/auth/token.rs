//! Defines the claims carried by a bearer token and how tokens are signed and verified.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// The payload of a bearer token.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserID,
    /// When the token was issued, in seconds since the Unix epoch.
    pub iat: u64,
    /// When the token expires, in seconds since the Unix epoch.
    pub exp: u64,
}

/// The keys for signing and verifying tokens, derived from one secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Create HMAC keys from `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

fn unix_seconds(date_time: OffsetDateTime) -> u64 {
    date_time.unix_timestamp().max(0) as u64
}

/// Create a signed token for `user_id` that is valid for `duration` from `issued_at`.
///
/// # Errors
///
/// Returns [Error::TokenCreationError] if the token could not be signed.
pub fn encode_token(
    user_id: UserID,
    issued_at: OffsetDateTime,
    duration: Duration,
    keys: &TokenKeys,
) -> Result<String, Error> {
    let claims = Claims {
        user_id,
        iat: unix_seconds(issued_at),
        exp: unix_seconds(issued_at + duration),
    };

    encode(&Header::default(), &claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreationError(error.to_string()))
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token is malformed, signed with a
/// different secret or has expired.
pub fn decode_token(token: &str, keys: &TokenKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("rejected token: {error}");
            Error::InvalidToken
        })
}
