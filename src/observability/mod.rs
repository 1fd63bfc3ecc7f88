//! Observability for studymate
//!
//! Logging goes through `tracing`; this module installs the subscriber.
//! HTTP request spans come from `tower_http::trace` in the server.

mod logging;

pub use logging::{init_logging, LogConfig};
