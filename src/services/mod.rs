//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{REFRESH_COOKIE_NAME, login_user, logout_user, refresh_token, register_user};
pub use user::current_user;

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
