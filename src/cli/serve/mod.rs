//! Serve command - runs the relay HTTP server

use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::create_router;
use crate::config::RelaySettings;

/// Run the relay server until Ctrl+C / SIGTERM
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let settings = RelaySettings::from_env()?;

    let shutdown = CancellationToken::new();
    let state = crate::create_app_state(&settings, shutdown.clone())?;
    let app = create_router(state);

    let addr = config.server.socket_addr()?;
    info!(
        provider = settings.provider.kind.as_str(),
        base_url = %settings.base_url,
        "Starting relay server on {}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Relay server shutdown complete");

    Ok(())
}

/// Wait for a shutdown signal, then cancel every in-flight relay
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    shutdown.cancel();
}
