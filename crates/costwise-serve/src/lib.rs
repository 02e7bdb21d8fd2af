//! costwise-serve - HTTP API
//!
//! Axum server exposing the resource inventory, its recommendations and the
//! cost summary to the dashboard frontend.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// API error types
pub mod error;

/// HTTP handlers for REST endpoints
pub mod handlers;

/// Server configuration from TOML and environment
pub mod config;

/// API response types matching frontend contract
pub mod responses;

/// Schema and seed initialization
pub mod startup;

/// Server instance management
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use handlers::AppState;
pub use server::CostwiseServer;
pub use startup::{initialize, StartupReport};
