use auth_server::core::telemetry;
use auth_server::repositories::UserRepository;
use auth_server::{AppState, Config, TokenService, cors_layer, create_router};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Inizializza la configurazione
    let config = Config::from_env()?;
    config.print_info();

    // Pool di connessioni e migrazioni dello schema
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    info!("Database migrations applied");

    let tokens = TokenService::new(
        &config.access_token_secret,
        &config.refresh_token_secret,
        chrono::Duration::minutes(config.access_token_ttl_minutes),
        chrono::Duration::days(config.refresh_token_ttl_days),
    )?;

    let state = Arc::new(
        AppState::new(UserRepository::new(pool), tokens).with_bcrypt_cost(config.bcrypt_cost),
    );

    // Crea il router
    let app = create_router(state).layer(cors_layer(&config.cors_allowed_origin)?);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    // Avvia il server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
