//! webhook-receiver server entry point.
//!
//! Starts the Axum HTTP server with the webhook and status endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use webhook_receiver::api;
use webhook_receiver::app_state::AppState;
use webhook_receiver::config::ReceiverConfig;
use webhook_receiver::sink::Sink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ReceiverConfig::from_env().context("loading configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        sink = %config.sink,
        db_path = %config.db_path.display(),
        "starting webhook-receiver"
    );

    // Build sink; for SQLite this opens the file and creates the schema
    let sink = Sink::from_config(&config)
        .await
        .context("initialising sink")?;
    let app_state = AppState::new(sink);
    let sink = std::sync::Arc::clone(&app_state.sink);

    let app = api::build_app_with_body_limit(app_state, config.max_body_bytes);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    sink.shutdown().await;
    tracing::info!("server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    tracing::info!("shutdown signal received");
}
