//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Token service (JWT access + refresh)
//! - Middleware di autenticazione
//! - Configurazione e logging
//! - Gestione errori e stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod token;

// Re-exports per facilitare l'import
pub use auth::{authentication_middleware, bearer_token};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use token::{Claims, TokenError, TokenKind, TokenService};
