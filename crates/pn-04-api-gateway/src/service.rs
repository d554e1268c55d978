//! API gateway service: binds the listener and serves the router until the
//! shutdown future resolves.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::{build_router, AppState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Validates `config` up front.
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?addr, "[pn-04] API gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("[pn-04] API gateway stopped");
        Ok(())
    }
}
