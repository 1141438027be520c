//! Token Service - Emissione e verifica dei token JWT (access + refresh)
//!
//! I due tipi di token si distinguono per chiave di firma, durata e claim `typ`.
//! Un access token rubato non può quindi essere usato come refresh token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// Durata di default dell'access token
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
/// Durata di default del refresh token
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

// struct che codifica il contenuto del token jwt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id come stringa
    pub exp: usize,  // Expiry time of the token
    pub iat: usize,  // Issued at time of the token
    pub typ: TokenKind,
}

impl Claims {
    /// Riconverte il subject nell'id dell'utente
    pub fn user_id(&self) -> Result<i32, TokenError> {
        self.sub.parse::<i32>().map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("{0} token secret is not configured")]
    MissingSecret(TokenKind),
    #[error("access and refresh tokens must use different secrets")]
    SharedSecret,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

impl TokenError {
    /// Errori dovuti al token presentato dal client (e non alla configurazione del server)
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidSignature | TokenError::Expired | TokenError::Malformed
        )
    }
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningKeys {
    fn new(kind: TokenKind, secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret(kind));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }
}

pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
    validation: Validation,
}

impl TokenService {
    /// Crea il servizio a partire dai due segreti e dalle rispettive durate
    ///
    /// # Errors
    /// * `MissingSecret` se uno dei segreti è vuoto
    /// * `SharedSecret` se access e refresh usano lo stesso segreto
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, TokenError> {
        let access = SigningKeys::new(TokenKind::Access, access_secret, access_ttl)?;
        let refresh = SigningKeys::new(TokenKind::Refresh, refresh_secret, refresh_ttl)?;
        if access_secret == refresh_secret {
            return Err(TokenError::SharedSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            access,
            refresh,
            validation,
        })
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        self.keys(kind).ttl
    }

    pub fn issue_access_token(&self, user_id: i32) -> Result<String, TokenError> {
        self.sign(TokenKind::Access, user_id, Utc::now())
    }

    pub fn issue_refresh_token(&self, user_id: i32) -> Result<String, TokenError> {
        self.sign(TokenKind::Refresh, user_id, Utc::now())
    }

    #[instrument(skip(self, issued_at))]
    fn sign(
        &self,
        kind: TokenKind,
        user_id: i32,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        debug!("Encoding JWT token for user");
        let keys = self.keys(kind);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (issued_at + keys.ttl).timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
            typ: kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            error!("Failed to encode JWT token: {:?}", e);
            TokenError::Signing(e)
        })
    }

    /// Verifica firma, scadenza e tipo del token.
    ///
    /// Il chiamante deve trattare `InvalidSignature`, `Expired` e `Malformed`
    /// allo stesso modo (utente non autenticato).
    #[instrument(skip(self, token))]
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| {
                let err = match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                };
                warn!("Rejected {} token: {}", kind, err);
                err
            })?;

        if data.claims.typ != kind {
            warn!("Token type mismatch: expected {}, got {}", kind, data.claims.typ);
            return Err(TokenError::Malformed);
        }

        Ok(data.claims)
    }
}
