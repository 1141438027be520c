//! Auth services - Registrazione, login, refresh e logout
//!
//! L'access token viene restituito nel body JSON, il refresh token solo in un
//! cookie HttpOnly limitato al path `/api`.

use crate::core::{AppError, AppState, TokenKind};
use crate::dtos::{
    AccessTokenDTO, CreateUserDTO, LoginDTO, LoginResponseDTO, MessageDTO, RefreshDTO,
    RegisterDTO, UserDTO,
};
use crate::entities::{hash_password, verify_password};
use crate::repositories::{StoreError, UserStore};
use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
};
use axum_extra::extract::{CookieJar, WithRejection};
use axum_extra::extract::cookie::{Cookie, SameSite};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api";

/// Cookie HttpOnly, Secure, SameSite=Strict con il refresh token
fn refresh_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Cookie vuoto con Max-Age=0 per forzare la cancellazione lato client
fn refresh_removal_cookie() -> Cookie<'static> {
    let mut cookie = refresh_cookie(String::new(), 0);
    cookie.make_removal();
    cookie
}

#[instrument(skip(state, body))]
pub async fn register_user<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterDTO>, AppError>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    // 1. Normalizzare e validare il DTO (nome, formato email, lunghezza password in caratteri e byte)
    // 2. Generare l'hash bcrypt della password fuori dal runtime async
    // 3. Salvare l'utente: l'indice unique sull'email restituisce Conflict sui duplicati
    // 4. Ritornare 201 con il DTO (senza password)
    let body = body.normalized();
    body.validate()?;
    if !body.password_fits_bcrypt() {
        return Err(AppError::bad_request("Password must be at most 72 bytes"));
    }

    let cost = state.bcrypt_cost;
    let password = body.password;
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

    let new_user = CreateUserDTO {
        name: body.name,
        email: body.email,
        password_hash,
    };

    let created_user = match state.user.create(&new_user).await {
        Ok(user) => user,
        Err(StoreError::Conflict) => {
            warn!("Registration rejected: email already registered");
            return Err(AppError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    info!("User {} registered", created_user.id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

#[instrument(skip(state, jar, body))]
pub async fn login_user<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginDTO>, AppError>, // JSON body
) -> Result<(CookieJar, Json<LoginResponseDTO>), AppError> {
    // 1. Validare che email e password siano presenti
    // 2. Cercare l'utente tramite email, NOT_FOUND se non esiste
    // 3. Ricalcolare l'hash e confrontarlo con quello memorizzato, UNAUTHORIZED se diverso
    // 4. Emettere access token (body) e refresh token (cookie)
    let body = body.normalized();
    body.validate()?;

    let user = match state.user.find_by_email(&body.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            warn!("Login attempt for unknown email");
            return Err(AppError::not_found("User not found"));
        }
        Err(e) => return Err(e.into()),
    };

    let password = body.password;
    let stored_hash = user.password_hash.clone();
    let password_matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;

    if !password_matches {
        warn!("Incorrect password for user {}", user.id);
        return Err(AppError::unauthorized("Incorrect password"));
    }

    let access_token = state.tokens.issue_access_token(user.id)?;
    let refresh_token = state.tokens.issue_refresh_token(user.id)?;
    let max_age = state.tokens.ttl(TokenKind::Refresh).num_seconds();

    info!("User {} logged in", user.id);
    let jar = jar.add(refresh_cookie(refresh_token, max_age));
    Ok((
        jar,
        Json(LoginResponseDTO {
            access_token,
            user: UserDTO::from(user),
        }),
    ))
}

#[instrument(skip(state, jar, body))]
pub async fn refresh_token<S: UserStore>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Json<AccessTokenDTO>, AppError> {
    // il cookie ha la precedenza; il body serve ai client senza cookie
    let token = match jar.get(REFRESH_COOKIE_NAME) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => refresh_token_from_body(&body).ok_or_else(|| {
            warn!("Refresh requested without a token");
            AppError::unauthorized("Refresh token required")
        })?,
    };

    let claims = state.tokens.verify(&token, TokenKind::Refresh)?;
    let user_id = claims.user_id()?;
    let access_token = state.tokens.issue_access_token(user_id)?;

    debug!("Issued new access token for user {}", user_id);
    Ok(Json(AccessTokenDTO { access_token }))
}

fn refresh_token_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice::<RefreshDTO>(body)
        .ok()
        .map(|dto| dto.refresh_token)
        .filter(|token| !token.is_empty())
}

/// Nessuno stato lato server da invalidare: si cancella solo il cookie
pub async fn logout_user(jar: CookieJar) -> (CookieJar, Json<MessageDTO>) {
    (
        jar.add(refresh_removal_cookie()),
        Json(MessageDTO {
            message: "Logout successful. Delete tokens on client side.".to_string(),
        }),
    )
}
