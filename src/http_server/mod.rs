//! # studymate HTTP Server Module
//!
//! Combines the REST routers into one Axum server with CORS and request
//! tracing.
//!
//! # Endpoints
//!
//! - `/` - Plain-text greeting
//! - `/health` - Health check
//! - `/user/*` - User documents
//! - `/partner-request/*` - Partner request documents

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
