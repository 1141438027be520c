//! Entities module - Entità del dominio applicativo
//!
//! Ogni entity corrisponde a una tabella nel database.

pub mod user;

// Re-exports per facilitare l'import
pub use user::{DEFAULT_BCRYPT_COST, MAX_PASSWORD_BYTES, User, hash_password, verify_password};
