use crate::core::token::{DEFAULT_ACCESS_TTL_MINUTES, DEFAULT_REFRESH_TTL_DAYS};
use crate::entities::DEFAULT_BCRYPT_COST;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub cors_allowed_origin: String,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente.
    /// Il file .env viene letto solo fuori da produzione.
    pub fn from_env() -> Result<Self, String> {
        if env::var("APP_ENV").as_deref() != Ok("production") {
            dotenv().ok();
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione leggendo le variabili tramite `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = app_env == "production";

        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let access_token_secret =
            secret(&lookup, "ACCESS_TOKEN_SECRET", DEV_ACCESS_SECRET, production)?;
        let refresh_token_secret =
            secret(&lookup, "REFRESH_TOKEN_SECRET", DEV_REFRESH_SECRET, production)?;
        if access_token_secret == refresh_token_secret {
            return Err(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be different".to_string(),
            );
        }

        let access_token_ttl_minutes: i64 = parse(
            &lookup,
            "ACCESS_TOKEN_TTL_MINUTES",
            DEFAULT_ACCESS_TTL_MINUTES,
        )?;
        let refresh_token_ttl_days: i64 =
            parse(&lookup, "REFRESH_TOKEN_TTL_DAYS", DEFAULT_REFRESH_TTL_DAYS)?;
        if access_token_ttl_minutes <= 0 || refresh_token_ttl_days <= 0 {
            return Err("Token lifetimes must be positive".to_string());
        }

        let bcrypt_cost: u32 = parse(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err("Invalid BCRYPT_COST: must be between 4 and 31".to_string());
        }

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port: u16 = parse(&lookup, "SERVER_PORT", 8000)?;
        let max_connections: u32 = parse(&lookup, "MAX_DB_CONNECTIONS", 10)?;

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| "http://localhost:5173".to_string());

        Ok(Config {
            database_url,
            access_token_secret,
            refresh_token_secret,
            access_token_ttl_minutes,
            refresh_token_ttl_days,
            bcrypt_cost,
            server_host,
            server_port,
            max_connections,
            cors_allowed_origin,
            app_env,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Environment: {}", self.app_env);
        info!("Server Address: {}:{}", self.server_host, self.server_port);
        info!("Database: {}", Self::mask_url(&self.database_url));
        info!("Max DB Connections: {}", self.max_connections);
        info!("CORS allowed origin: {}", self.cors_allowed_origin);
        info!(
            "Token lifetimes: access {}m, refresh {}d",
            self.access_token_ttl_minutes, self.refresh_token_ttl_days
        );
        info!("Bcrypt cost: {}", self.bcrypt_cost);
        if self.uses_default_secrets() {
            warn!("USING DEFAULT TOKEN SECRETS (INSECURE!)");
        }
    }

    pub fn uses_default_secrets(&self) -> bool {
        self.access_token_secret == DEV_ACCESS_SECRET
            || self.refresh_token_secret == DEV_REFRESH_SECRET
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.rfind('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

fn secret<F>(lookup: &F, key: &str, dev_default: &str, production: bool) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|value| !value.is_empty()) {
        Some(value) => Ok(value),
        None if production => Err(format!("{} must be set in production", key)),
        None => {
            warn!("{} not set, using default (not secure for production!)", key);
            Ok(dev_default.to_string())
        }
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
