//! Repositories module - Coordinatore per i repository del progetto
//!
//! Ogni repository implementa `UserStore`: quello MySQL per la produzione,
//! quello in memoria per i test.

// Dichiarazione dei sotto-moduli
pub mod memory;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read, StoreError, UserStore};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use memory::InMemoryUserRepository;
pub use user::UserRepository;
