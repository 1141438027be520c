//! Server library - espone i moduli principali per il binario e per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, TokenService};

use crate::repositories::UserStore;
use axum::http::{HeaderValue, Method, header};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router<S: UserStore>(state: Arc<AppState<S>>) -> Router {
    use crate::services::root;

    Router::new()
        .route("/", get(root))
        .nest("/api", configure_auth_routes(state.clone()))
        .with_state(state)
}

/// Configura le routes di autenticazione (register, login, refresh, logout, user)
fn configure_auth_routes<S: UserStore>(state: Arc<AppState<S>>) -> Router<Arc<AppState<S>>> {
    use crate::core::authentication_middleware;
    use crate::services::*;

    // Rotte che richiedono un access token valido
    let protected_routes = Router::new()
        .route("/user", get(current_user))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware::<S>,
        ));

    Router::new()
        .route("/register", post(register_user::<S>))
        .route("/login", post(login_user::<S>))
        .route("/refresh", post(refresh_token::<S>))
        .route("/logout", post(logout_user))
        .merge(protected_routes)
}

/// CORS per il frontend: una sola origine, con credenziali (cookie di refresh)
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, String> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|_| format!("Invalid CORS_ALLOWED_ORIGIN: {}", allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}
