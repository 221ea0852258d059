//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use pulse_runtime::TelemetryEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Pulse Daemon Server
pub struct Server {
    config: DaemonConfig,
    engine: Arc<TelemetryEngine>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let engine = Arc::new(TelemetryEngine::new(config.engine.clone())?);
        Ok(Self { config, engine })
    }

    /// Run the server until Ctrl+C or SIGTERM
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let state = AppState::new(
            self.engine.clone(),
            shutdown_rx.clone(),
            Duration::from_secs(self.config.server.keep_alive_secs),
        );
        let app = create_router(state, self.config.server.enable_cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Pulse daemon listening on {}", addr);

        let drivers = self
            .engine
            .start(shutdown_rx)
            .ok_or_else(|| DaemonError::Server("Telemetry drivers already running".to_string()))?;

        // SSE streams end on the shutdown flag; raise it before axum drains connections.
        let signal_tx = shutdown_tx.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signal_tx.send(true);
            })
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Pulse daemon shutting down");

        let _ = shutdown_tx.send(true);
        drivers.join().await;

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
