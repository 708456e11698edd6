//! # HTTP Server
//!
//! Binds the listener and serves the REST router with request tracing.

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;

/// HTTP server for the plant API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Wrap an application router with access tracing
    pub fn new(config: HttpServerConfig, router: Router) -> Self {
        Self {
            config,
            router: router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        info!(addr = %listener.local_addr()?, "listening");

        axum::serve(listener, self.router).await
    }
}
