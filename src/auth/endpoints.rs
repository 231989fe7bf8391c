//! Route handlers for registering, logging in and reading the current user.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    Error, UserID,
    auth::{AuthState, LogInForm, RegisterForm},
    extract::JsonBody,
    user::User,
};

/// The response body for a successful registration or log in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Handler for registering a new user.
///
/// Responds with 201 Created, the new user and a token so the client is
/// logged in straight away.
pub async fn register_user(
    State(state): State<AuthState>,
    JsonBody(form): JsonBody<RegisterForm>,
) -> Result<Response, Error> {
    let user = state.auth.register(form)?;
    let token = state.auth.issue_token(user.id)?;

    tracing::info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })).into_response())
}

/// Handler for log-in requests.
///
/// # Errors
///
/// Responds with 401 Unauthorized if the email does not belong to a registered
/// user or the password is not correct.
pub async fn log_in(
    State(state): State<AuthState>,
    JsonBody(form): JsonBody<LogInForm>,
) -> Result<Json<AuthResponse>, Error> {
    let (user, token) = state.auth.log_in(form)?;

    Ok(Json(AuthResponse { user, token }))
}

/// Handler that returns the profile of the logged in user.
pub async fn get_me(
    State(state): State<AuthState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<User>, Error> {
    state.auth.get_user(user_id).map(Json)
}
