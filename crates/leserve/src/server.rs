//! Server instance management

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{build_app, AppState};
use lepriorite::PriorityScorer;

/// LeServe HTTP server
///
/// Manages Axum server lifecycle including startup and graceful shutdown.
pub struct LeServeServer {
    /// Server configuration
    config: ServerConfig,

    /// Scorer shared by every request
    scorer: PriorityScorer,
}

impl LeServeServer {
    /// Create new server instance
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    ///
    /// # Returns
    ///
    /// `Result<LeServeServer, ApiError>` - Server or error
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        Self::with_scorer(config, PriorityScorer::new())
    }

    /// Create a server around an existing scorer
    pub fn with_scorer(config: ServerConfig, scorer: PriorityScorer) -> Result<Self, ApiError> {
        if let Err(e) = config.validate() {
            return Err(ApiError::internal(format!("Invalid config: {}", e)));
        }

        Ok(Self { config, scorer })
    }

    /// Bind the configured host and port
    ///
    /// Host names such as `localhost` are resolved; the first address that
    /// binds wins.
    pub async fn bind(&self) -> Result<TcpListener, ApiError> {
        let host = self.config.host.as_str();
        let port = self.config.port;

        TcpListener::bind((host, port)).await.map_err(|e| {
            error!("Failed to bind to {}:{}: {:?}", host, port, e);
            ApiError::internal(format!("Failed to bind to {}:{}: {}", host, port, e))
        })
    }

    /// Start server
    ///
    /// Serves until Ctrl+C or SIGTERM is received.
    pub async fn start(&self) -> Result<(), ApiError> {
        let listener = self.bind().await?;

        let state = AppState::new(self.scorer.clone(), self.config.clone());
        let app = build_app(state);

        match listener.local_addr() {
            Ok(addr) => info!("Server listening on: http://{}", addr),
            Err(_) => info!("Server listening on: {}", self.server_url()),
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::wait_for_shutdown())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }

    /// Wait for shutdown signal
    ///
    /// Resolves when Ctrl+C or SIGTERM is received.
    pub async fn wait_for_shutdown() {
        let ctrl_c = async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received shutdown signal"),
                Err(e) => {
                    error!("Failed to install Ctrl+C handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix;
            match unix::signal(unix::SignalKind::terminate()) {
                Ok(mut term) => {
                    term.recv().await;
                    info!("Received TERM signal");
                }
                Err(e) => {
                    error!("Failed to install TERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    /// Get server configuration
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }
}
