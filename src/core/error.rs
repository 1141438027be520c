use crate::core::token::TokenError;
use crate::repositories::StoreError;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::not_found("User not found"),
            StoreError::Conflict => Self::conflict("Email already registered"),
            StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                error!("Database pool unavailable");
                Self::service_unavailable("Database unavailable")
            }
            StoreError::Database(e) => {
                error!("Database error: {:?}", e);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

// scaduto, manomesso o malformato: per il client è sempre 401
impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        if err.is_unauthenticated() {
            warn!("Unauthenticated request: {}", err);
            Self::unauthorized("Invalid or expired token")
        } else {
            error!("Token service failure: {}", err);
            Self::internal_server_error("Internal server error")
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        match err {
            bcrypt::BcryptError::Truncation(_) => {
                Self::bad_request("Password must be at most 72 bytes")
            }
            err => {
                error!("Password hashing failed: {:?}", err);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!("Blocking task failed: {:?}", err);
        Self::internal_server_error("Internal server error")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

// campo mancante, tipo sbagliato, JSON malformato o content-type errato: sempre 400
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_collapse_to_unauthorized() {
        for err in [
            TokenError::Expired,
            TokenError::InvalidSignature,
            TokenError::Malformed,
        ] {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(app_err.message(), "Invalid or expired token");
        }
    }

    #[test]
    fn configuration_failures_are_internal() {
        let app_err = AppError::from(TokenError::SharedSecret);
        assert_eq!(app_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn oversized_password_is_bad_request() {
        let app_err = AppError::from(bcrypt::BcryptError::Truncation(90));
        assert_eq!(app_err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_status_codes() {
        assert_eq!(
            AppError::from(StoreError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Conflict).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let internal = AppError::from(StoreError::Database(sqlx::Error::Protocol("boom".into())));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(internal.details.is_none());
    }
}
