//! leserve - HTTP Server
//!
//! *Le Serve* (The Server) - Axum-based HTTP front for the LePriorite scorer

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// API error types
pub mod error;

/// HTTP handlers for REST endpoints
pub mod handlers;

/// Server configuration from TOML
pub mod config;

/// API request types
pub mod requests;

/// API response types matching client contract
pub mod responses;

/// Server instance management
pub mod server;

/// Client with fallback for remote scoring
pub mod client;

pub use client::AnalyzerClient;
pub use config::{ConfigOverrides, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use handlers::{apply_layers, build_app, AppState};
pub use server::LeServeServer;
