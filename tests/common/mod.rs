#![allow(dead_code)]

use auth_server::core::{AppState, TokenService};
use auth_server::repositories::InMemoryUserRepository;
use axum::http::{HeaderValue, header};
use axum_test::{TestResponse, TestServer};
use serde_json::json;
use std::sync::Arc;

pub const ACCESS_SECRET: &str = "access-secret-for-integration-tests";
pub const REFRESH_SECRET: &str = "refresh-secret-for-integration-tests";

pub type TestState = Arc<AppState<InMemoryUserRepository>>;

/// Crea un AppState per i test con store in memoria e bcrypt al costo minimo
pub fn create_test_state() -> TestState {
    let tokens = TokenService::new(
        ACCESS_SECRET,
        REFRESH_SECRET,
        chrono::Duration::minutes(15),
        chrono::Duration::days(30),
    )
    .expect("valid token service");

    Arc::new(AppState::new(InMemoryUserRepository::new(), tokens).with_bcrypt_cost(4))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: TestState) -> TestServer {
    let app = auth_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT firmato a mano, per testare token scaduti o con claim arbitrari
///
/// # Arguments
/// * `sub` - Subject del token
/// * `typ` - "access" o "refresh"
/// * `expires_in_secs` - Secondi alla scadenza (negativo = già scaduto)
/// * `secret` - Secret key per firmare il token
pub fn create_test_jwt(sub: &str, typ: &str, expires_in_secs: i64, secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = Utc::now();
    let claims = json!({
        "sub": sub,
        "typ": typ,
        "iat": now.timestamp(),
        "exp": (now + Duration::seconds(expires_in_secs)).timestamp(),
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

pub fn refresh_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("refresh_token={}", token)).unwrap()
}

pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/register")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

/// Header Set-Cookie della risposta
pub fn set_cookie_header(response: &TestResponse) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header should be present")
        .to_str()
        .unwrap()
        .to_string()
}

/// Valore del cookie refresh_token impostato dalla risposta
pub fn refresh_token_from(response: &TestResponse) -> String {
    let set_cookie = set_cookie_header(response);
    let pair = set_cookie.split(';').next().unwrap().trim();
    pair.strip_prefix("refresh_token=")
        .expect("Set-Cookie should carry the refresh token")
        .to_string()
}
