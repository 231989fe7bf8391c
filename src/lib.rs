//! A personal expense tracker.
//!
//! Users register, log in with a bearer token, and record income and expense
//! transactions against system default or personal categories. The library
//! provides a JSON REST API for managing transactions and categories, plus a
//! monthly report and an all time dashboard with a per category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod category;
mod database_id;
mod db;
mod endpoints;
mod error;
mod extract;
mod logging;
mod pagination;
mod password;
mod report;
mod routing;
mod stores;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;
mod transaction_type;
mod user;

pub use app_state::AppState;
pub use auth::AuthConfig;
pub use db::{initialize as initialize_db, seed_default_categories};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use transaction_type::TransactionType;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
