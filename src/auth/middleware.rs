//! Authentication middleware that validates bearer tokens.

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, Error, auth::AuthProvider, stores::sqlite::SQLiteUserStore};

/// The state needed for the auth middleware and handlers.
#[derive(Clone)]
pub struct AuthState {
    /// Registers users and verifies tokens.
    pub auth: AuthProvider<SQLiteUserStore>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            auth: state.auth.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The user ID is placed into the request extensions and the request executed
/// normally if the token is valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer = match parts.extract::<TypedHeader<Authorization<Bearer>>>().await {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(rejection) if rejection.is_missing() => return Error::MissingToken.into_response(),
        Err(_) => return Error::InvalidToken.into_response(),
    };

    match state.auth.authenticate(bearer.token()) {
        Ok(user_id) => {
            parts.extensions.insert(user_id);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;

    use crate::{UserID, test_utils::get_test_app_state};

    use super::auth_guard;

    async fn echo_user_id(Extension(user_id): Extension<UserID>) -> String {
        user_id.to_string()
    }

    fn get_test_server() -> (TestServer, String) {
        let state = get_test_app_state();
        let token = state.auth.issue_token(UserID::new(123)).unwrap();
        let app = Router::new()
            .route("/protected", get(echo_user_id))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        (TestServer::new(app), token)
    }

    #[tokio::test]
    async fn valid_token_passes_user_id() {
        let (server, token) = get_test_server();

        let response = server.get("/protected").authorization_bearer(token).await;

        response.assert_status_ok();
        response.assert_text("123");
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (server, _) = get_test_server();

        let response = server.get("/protected").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn forged_token_is_unauthorized() {
        let (server, _) = get_test_server();

        let response = server
            .get("/protected")
            .authorization_bearer("definitely.not.valid")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
