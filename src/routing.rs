//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::{auth_guard, get_me, log_in, register_user},
    category::{create_category, delete_category, get_category, list_categories, update_category},
    endpoints,
    report::{get_dashboard, get_monthly_report},
    transaction::{
        create_transaction, delete_transaction, get_transaction, list_transactions,
        update_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(endpoints::ME, get(get_me))
        .route(
            endpoints::CATEGORIES,
            get(list_categories).post(create_category),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions).post(create_transaction),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report))
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Check that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
