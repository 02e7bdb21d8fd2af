//! Server instance management

use axum::Router;
use costwise_store::{ResourceStore, Storage};
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{create_router, AppState};
use crate::startup::initialize;

/// Costwise HTTP server
///
/// Owns the configuration and the shared handler state, and runs the axum
/// service until a shutdown signal arrives.
pub struct CostwiseServer {
    /// Server configuration
    config: ServerConfig,

    /// State handed to every request
    state: AppState,
}

impl CostwiseServer {
    /// Create a server backed by the SQLite file at `config.db_path`.
    ///
    /// Runs schema initialization and, if enabled, demo seeding before
    /// returning.
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::internal(format!("Invalid config: {}", e)))?;

        let mut storage = Storage::open(&config.db_path).map_err(|e| {
            error!("Failed to open storage: {}", e);
            ApiError::internal(format!("Failed to open storage: {}", e))
        })?;

        initialize(&mut storage, config.seed_demo_data).map_err(|e| {
            error!("Failed to initialize storage: {}", e);
            ApiError::internal(format!("Failed to initialize storage: {}", e))
        })?;

        Ok(Self::with_store(config, storage))
    }

    /// Create a server around an already-prepared store
    pub fn with_store<S>(config: ServerConfig, store: S) -> Self
    where
        S: ResourceStore + 'static,
    {
        let state = AppState::new(store, config.clone());
        Self { config, state }
    }

    /// Shared handler state
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the full application: routes, CORS, request tracing, state
    pub fn router(&self) -> Router {
        build_app(self.state.clone())
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.config
            .socket_addr()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Get server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn start(&self) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Server listening on: {}", self.server_url());

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }
}

/// Router with middleware applied and state attached
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    create_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS policy for the configured dashboard origins. Unparseable origins are
/// skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
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
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received TERM signal, shutting down");
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
