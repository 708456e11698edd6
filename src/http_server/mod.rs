//! # HTTP Server Module
//!
//! Process-level listener around the REST router.

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
