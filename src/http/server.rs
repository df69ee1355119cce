//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router from configured redirects and downloads
//! - Accept application routes registered by library callers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::FromRef,
    http::Request,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, DownloadConfig, ResponderConfig};
use crate::http::request::request_id;
use crate::http::responder::Responder;
use crate::http::routes;
use crate::lifecycle::shutdown::wait_for;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Responder,
    pub downloads: Arc<DownloadConfig>,
}

impl AppState {
    pub fn new(config: &ResponderConfig) -> Self {
        Self {
            responder: Responder::new(&config.redirect, &config.downloads),
            downloads: Arc::new(config.downloads.clone()),
        }
    }
}

impl FromRef<AppState> for Responder {
    fn from_ref(state: &AppState) -> Self {
        state.responder.clone()
    }
}

/// HTTP server exposing the responder.
pub struct HttpServer {
    routes: Router<AppState>,
    state: AppState,
    config: ResponderConfig,
}

impl HttpServer {
    /// Create a server with the routes named by the configuration.
    ///
    /// The configuration is validated first; route registration only ever
    /// sees literal paths and redirect statuses.
    pub fn new(config: ResponderConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let state = AppState::new(&config);

        let mut routes = routes::redirect_routes(&config.redirects);
        if config.downloads.enabled {
            tracing::info!(
                directory = %config.downloads.directory,
                prefix = %config.downloads.route_prefix,
                "Serving downloads"
            );
            routes = routes.merge(routes::download_routes(&config.downloads));
        }

        Ok(Self {
            routes,
            state,
            config,
        })
    }

    /// Register additional application routes.
    pub fn merge(mut self, routes: Router<AppState>) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    /// Finish the router: fallback, state and middleware layers.
    #[allow(deprecated)]
    pub fn into_router(self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request.headers()),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )));

        self.routes
            .fallback(routes::not_found)
            .with_state(self.state)
            .layer(middleware)
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            redirect_rules = self.config.redirects.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
