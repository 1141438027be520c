//! DTOs module - Data Transfer Objects
//!
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod auth;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{AccessTokenDTO, LoginResponseDTO, MessageDTO, RefreshDTO};
pub use user::{CreateUserDTO, LoginDTO, RegisterDTO, UserDTO};
