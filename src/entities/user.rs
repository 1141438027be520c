//! User entity - Entità utente con metodi per gestione password

use bcrypt::{non_truncating_hash, non_truncating_verify};
use std::fmt;

/// Costo di default per bcrypt
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt lavora su al massimo 72 byte di input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Riga della tabella `users`.
///
/// Non implementa `Serialize`: verso il client si passa sempre da `UserDTO`,
/// così l'hash della password non può finire in una risposta.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: Vec<u8>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Hash a password using bcrypt with the given cost.
///
/// Oltre i 72 byte restituisce `BcryptError::Truncation` invece di troncare.
pub fn hash_password(password: &str, cost: u32) -> Result<Vec<u8>, bcrypt::BcryptError> {
    let hash = non_truncating_hash(password, cost)?;
    Ok(hash.into_bytes())
}

/// Ricalcola l'hash con il salt memorizzato e confronta (mai decifrare)
pub fn verify_password(password: &str, password_hash: &[u8]) -> bool {
    match std::str::from_utf8(password_hash) {
        Ok(stored) => non_truncating_verify(password, stored).unwrap_or(false),
        Err(_) => false,
    }
}
