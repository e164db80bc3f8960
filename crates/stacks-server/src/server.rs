use tokio::net::TcpListener;

use stacks_auth::{IdentityRegistry, TokenKey};
use stacks_catalog::loader;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// The stacks book-catalog server.
pub struct StacksServer {
    config: ServerConfig,
    state: AppState,
}

impl StacksServer {
    /// Load the dataset and assemble the application state.
    ///
    /// A malformed or missing dataset fails here, before the listener ever
    /// binds; the service is meaningless without a loaded catalog.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let catalog = loader::load_file(&config.dataset_path)?;
        let registry = IdentityRegistry::with_ttl(
            TokenKey::from_secret(&config.token_secret),
            config.token_ttl_secs,
        );
        let state = AppState::new(catalog, registry);
        Ok(Self { config, state })
    }

    /// Assemble a server around pre-built state (useful for testing).
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("stacks server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
