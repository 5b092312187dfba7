use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::routes::router;
use crate::state::AppState;

/// A running HTTP server bound to a local address.
///
/// The server stops when [`Server::shutdown`] is called or the value is
/// dropped.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Server {
    /// Bind `bind_addr` (e.g. `127.0.0.1:3000`, or port `0` for an ephemeral
    /// port) and start serving in a background task.
    pub async fn start(bind_addr: &str, state: AppState) -> anyhow::Result<Self> {
        let app = router(state);
        let listener = TcpListener::bind(bind_addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!("Server error: {e}");
            }
        });

        info!("String Analysis API listening on http://{addr}");
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to stop accepting connections.
    pub fn shutdown(&mut self) -> anyhow::Result<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|()| anyhow::anyhow!("failed to send server shutdown signal"))?;
        }
        Ok(())
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        self.shutdown()?;
        if let Some(task) = self.task.take() {
            task.await?;
        }
        info!("Server stopped");
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
