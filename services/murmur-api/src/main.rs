//! Murmur API server

use std::net::SocketAddr;
use std::sync::Arc;

use murmur_api::{build_router, telemetry, AppState, Config};
use murmur_auth_core::RedisSessionStore;
use murmur_db::Repositories;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format)?;

    tracing::info!(
        http_port = config.http_port,
        redis = %config.redis.addr,
        token_ttl_secs = config.auth.token_ttl.as_secs(),
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(telemetry::setup_metrics()?)
    } else {
        None
    };

    // Resource store
    let pool = murmur_db::create_pool(&config.database_url).await?;
    let repos = Repositories::new(pool);
    tracing::info!("Database pool created");

    // Session store
    let sessions = RedisSessionStore::connect(&config.redis).await?;

    let http_port = config.http_port;
    let state = AppState::new(
        config,
        Arc::new(repos.accounts),
        Arc::new(repos.posts),
        Arc::new(repos.catalog),
        Arc::new(sessions),
    );

    let app = build_router(state, metrics_handle);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
