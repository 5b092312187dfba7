use stringlens_config::Config;
use stringlens_server::{AppState, Server};
use tracing::info;

/// Input for the serve command.
#[derive(Debug, Clone)]
pub struct ServeInput {
    pub config: Config,
    /// Optional bind host (overrides config)
    pub host: Option<String>,
    /// Optional port (overrides config and environment)
    pub port: Option<u16>,
}

/// Strategy for running the HTTP server until Ctrl+C.
///
/// The store is created here and lives exactly as long as the server.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut server_config = input.config.server;
        if let Some(host) = input.host {
            server_config.host = host;
        }
        if let Some(port) = input.port {
            server_config.port = port;
        }

        let state = AppState::in_memory()?;
        let server = Server::start(&server_config.bind_addr(), state).await?;

        info!("Press Ctrl+C to stop.");
        tokio::signal::ctrl_c().await?;

        info!("Shutting down");
        server.stop().await
    }
}
