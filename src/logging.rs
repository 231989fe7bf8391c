//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::Error;

/// The number of characters of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// JSON fields whose values are never written to the logs.
const SECRET_FIELDS: [&str; 2] = ["password", "token"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// Passwords, tokens and the `Authorization` header are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };

    log_request(
        &parts.method,
        &parts.uri,
        &redact_headers(&parts.headers),
        &redact_body(&body_bytes),
    );

    let response = next
        .run(Request::from_parts(parts, Body::from(body_bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };

    log_response(
        parts.status,
        &redact_headers(&parts.headers),
        &redact_body(&body_bytes),
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body) -> Result<Bytes, Error> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::BodyReadError(error.to_string()))
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();

    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }

    headers
}

/// The body as text with the values of secret JSON fields replaced.
///
/// Bodies that are not JSON are returned as lossy UTF-8.
fn redact_body(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(mut json) => {
            redact_json(&mut json);
            json.to_string()
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SECRET_FIELDS.contains(&key.as_str()) {
                    *field = Value::String(REDACTED.to_owned());
                } else {
                    redact_json(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None` if the
/// body is short enough to log in full.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(
    method: &axum::http::Method,
    uri: &axum::http::Uri,
    headers: &HeaderMap,
    body: &str,
) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {method} {uri} {headers:?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {method} {uri} {headers:?}\nbody: {body:?}"),
    }
}

fn log_response(status: axum::http::StatusCode, headers: &HeaderMap, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {status} {headers:?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {status} {headers:?}\nbody: {body:?}"),
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::{
        Json, Router,
        http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
        middleware,
        routing::post,
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use super::{
        LOG_BODY_LENGTH_LIMIT, REDACTED, logging_middleware, redact_body, redact_headers,
        truncate,
    };

    #[test]
    fn redacts_password_and_token_fields() {
        let body = json!({
            "email": "alice@example.com",
            "password": "hunter2",
            "nested": { "token": "abc.def.ghi" },
        })
        .to_string();

        let redacted: Value = serde_json::from_str(&redact_body(body.as_bytes())).unwrap();

        assert_eq!(
            redacted,
            json!({
                "email": "alice@example.com",
                "password": REDACTED,
                "nested": { "token": REDACTED },
            })
        );
    }

    #[test]
    fn keeps_non_json_body() {
        assert_eq!(redact_body(b"hello"), "hello");
    }

    #[test]
    fn redacts_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret"));

        let redacted = redact_headers(&headers);

        assert_eq!(redacted.get(AUTHORIZATION).unwrap(), REDACTED);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate("short"), None);
        assert_eq!(truncate(&"a".repeat(LOG_BODY_LENGTH_LIMIT)), None);
    }

    #[test]
    fn truncates_on_char_boundary() {
        let body = "🍔".repeat(LOG_BODY_LENGTH_LIMIT + 1);

        let truncated = truncate(&body).unwrap();

        assert_eq!(truncated.chars().count(), LOG_BODY_LENGTH_LIMIT);
    }

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    #[tokio::test]
    async fn passes_body_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);
        let body = json!({ "password": "hunter2", "note": "x".repeat(100) });

        let response = server.post("/echo").json(&body).await;

        response.assert_status_ok();
        response.assert_json(&body);
    }
}
