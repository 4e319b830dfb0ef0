//! Application server
//!
//! Binds the listener, serves the router and stops on SIGINT/SIGTERM,
//! letting in-flight conversions finish.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, signal};

use crate::{
    config::Settings,
    server::{routes, state::AppState},
};

/// Main application struct
pub struct App {
    addr: SocketAddr,
    router: Router,
}

impl App {
    /// Build the AWS-backed state and the router
    pub async fn new(settings: Settings) -> Result<Self> {
        let addr = settings
            .server_addr()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address {}", settings.server_addr()))?;

        tracing::debug!("Initializing application state");
        let state = AppState::new(settings).await?;

        Ok(Self::with_state(addr, state))
    }

    /// Build the application around an existing state
    pub fn with_state(addr: SocketAddr, state: AppState) -> Self {
        Self {
            addr,
            router: routes::create_router(state),
        }
    }

    /// Bind the configured address and serve until a shutdown signal
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(addr = ?listener.local_addr().ok(), "Server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Completes when SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
