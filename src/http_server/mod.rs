//! HTTP-facing layer: routers, handlers and response envelopes.

pub mod config;
pub mod entry_routes;
pub mod health_routes;
pub mod responses;
pub mod server;
pub mod stats_routes;

pub use config::HttpServerConfig;
pub use server::{ApiState, HttpServer};
