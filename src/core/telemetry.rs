//! Inizializzazione del logging strutturato

use tracing_subscriber::EnvFilter;

/// Installa il subscriber globale; il livello si regola con `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Tracing initialized");
}
