//! HTTP server for a bound router.
//!
//! # Responsibilities
//! - Serve the router produced by [`AxumHost`](crate::http::AxumHost)
//! - Stop on Ctrl+C or on the shared shutdown signal
//!
//! # Design Decisions
//! - Binding happens before the server is created; the server never re-binds
//! - In-flight requests finish before `run` returns (graceful shutdown)

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// HTTP server wrapping a fully bound router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server for the given router.
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or Ctrl+C is pressed.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for Ctrl+C or the broadcast shutdown signal.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                // Without a Ctrl+C handler only the broadcast can stop us.
                let _ = shutdown.recv().await;
            }
        }
        _ = shutdown.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
