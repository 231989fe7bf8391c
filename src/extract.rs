//! Request extractors that reject malformed input with the app's JSON [Error] body.
//!
//! axum's own extractors answer with plain text and, for JSON bodies that do
//! not match the expected shape, 422. These wrappers turn every rejection into
//! [Error::InvalidRequest] so clients always get `{"error": ...}` with 400.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// A JSON request body deserialized into `T`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// URL query parameters deserialized into `T`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);

/// Path parameters deserialized into `T`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParam<T>(pub T);
