//! medinfo server entry point

use medinfo_store::SqliteStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medinfo_server::{build_router, config::ServerConfig, AppState};

#[tokio::main]
async fn main() {
    // Load configuration before logging so `log.level` can apply
    let loaded = ServerConfig::load(
        std::path::Path::new("config.yaml")
            .exists()
            .then_some("config.yaml"),
    );
    let level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    tracing::info!("Starting medinfo server...");

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        ServerConfig::default()
    });

    // Create data and upload directories
    for dir in [config.storage.data_dir.clone(), config.upload_dir()] {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::error!("Failed to create directory {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    // Initialize store
    let store = SqliteStore::open(config.database_path()).unwrap_or_else(|e| {
        tracing::error!("Failed to open database: {}", e);
        std::process::exit(1);
    });

    if config.storage.seed_body_parts {
        match store.seed_default_body_parts() {
            Ok(0) => {}
            Ok(n) => tracing::info!("Seeded {} body parts", n),
            Err(e) => {
                tracing::error!("Failed to seed body parts: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Some(admin) = &config.auth.bootstrap_admin {
        match store.ensure_admin(&admin.name, &admin.email, &admin.password) {
            Ok(true) => tracing::info!(email = %admin.email, "Created bootstrap admin"),
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Failed to create bootstrap admin: {}", e);
                std::process::exit(1);
            }
        }
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(
        "Medicine aggregation: {:?}, uploads in {}",
        config.storage.medicine_aggregation,
        config.upload_dir().display()
    );

    let state = Arc::new(AppState::new(store, config));

    // Build router
    let app = build_router(state);

    // Bind TCP listener
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap_or_else(|e| {
        tracing::error!("Server error: {}", e);
    });

    tracing::info!("Server shut down gracefully");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
