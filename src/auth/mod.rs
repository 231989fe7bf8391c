//! Registration, log in and bearer token authentication.

mod endpoints;
mod middleware;
mod provider;
mod token;

pub use endpoints::{get_me, log_in, register_user};
pub use middleware::{AuthState, auth_guard};
pub use provider::{AuthConfig, AuthProvider, LogInForm, RegisterForm};
