//! Application State - Stato condiviso dell'applicazione
//!
//! Costruito una volta all'avvio e passato a route e middleware tramite `Arc`.
//! Non esiste un handle globale al database.

use crate::core::token::TokenService;
use crate::entities::DEFAULT_BCRYPT_COST;
use crate::repositories::UserStore;

/// Stato condiviso tra tutte le route e middleware
pub struct AppState<S> {
    /// Credential store (MySQL in produzione, in memoria nei test)
    pub user: S,

    /// Emissione e verifica di access e refresh token
    pub tokens: TokenService,

    /// Costo bcrypt usato in registrazione
    pub bcrypt_cost: u32,
}

impl<S: UserStore> AppState<S> {
    /// Crea una nuova istanza di AppState
    ///
    /// # Arguments
    /// * `user` - Credential store
    /// * `tokens` - Token service già configurato con i due segreti
    pub fn new(user: S, tokens: TokenService) -> Self {
        Self {
            user,
            tokens,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}
