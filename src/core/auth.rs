use crate::core::token::TokenKind;
use crate::core::{AppError, AppState};
use crate::repositories::{StoreError, UserStore};
use axum::extract::State;
use axum::{
    body::Body,
    extract::Request,
    http::{self, HeaderMap, Response},
    middleware::Next,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Estrae il token da un header `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            warn!("Missing authorization header");
            AppError::unauthorized("Authorization header required")
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Authorization must be Bearer <token>")
        })?;

    let mut parts = auth_header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => {
            warn!("Malformed authorization header");
            Err(AppError::unauthorized("Authorization must be Bearer <token>"))
        }
    }
}

/// Verifica l'access token e inserisce l'utente corrente nelle extension della richiesta
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = bearer_token(req.headers())?;
    let claims = state.tokens.verify(token, TokenKind::Access)?;
    let user_id = claims.user_id()?;

    // Fetch the user details from the database
    let current_user = match state.user.find_by_id(user_id).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            warn!("User {} from token not found in database", user_id);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
        Err(e) => return Err(e.into()),
    };

    info!("User authenticated: {}", current_user.id);
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn wrong_scheme_or_shape_is_unauthorized() {
        for value in ["Basic abc", "Bearer", "Bearer a b", "abc.def.ghi", "bearer abc"] {
            let err = bearer_token(&headers_with(value)).unwrap_err();
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "{}", value);
        }
    }
}
