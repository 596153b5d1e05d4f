//! Folio shell - main entry point

use anyhow::Context;
use folio_shell::{build_router, AppState, Config, SessionManager, ShellState};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_shell=debug,folio_networking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folio shell");

    let config = Config::from_env()?;

    // Get data directory
    let data_dir = dirs_next::data_local_dir()
        .map(|p| p.join("FolioDesk"))
        .unwrap_or_else(|| PathBuf::from("."));

    // Derive encryption key from machine fingerprint (Argon2id + machine-uid)
    let encryption_key = folio_persistence::derive_machine_key()
        .context("Failed to derive machine encryption key")?;

    tracing::info!("Encryption key derived from machine fingerprint");

    let app_state = AppState::new(data_dir, &config.api_base, &encryption_key)
        .context("Failed to create application state")?;
    app_state
        .init_db()
        .await
        .context("Failed to initialize database")?;

    let sessions = SessionManager::new(app_state.clone());

    // Try restoring the persisted session; a dead token is cleared here,
    // a network failure just leaves the user at the login page.
    match sessions.check_session().await {
        Ok(Some(user)) => tracing::info!("Restored session for {}", user.username),
        Ok(None) => tracing::info!("No session to restore"),
        Err(e) => tracing::warn!("Session check failed, starting logged out: {}", e),
    }

    let shell_state = ShellState::new(app_state, sessions);
    let router = build_router(shell_state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen))?;

    tracing::info!(
        "Shell listening on http://{} (backend: {})",
        config.listen,
        config.api_base
    );

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
