//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the routing table: (method, path) → handler, 404 fallthrough
//! - Wire up middleware (request ID, tracing, CORS headers, timeout, body limit)
//! - Serve on a listener until shutdown is signalled

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::header,
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::http::response::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
use crate::http::{pages, proxy};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::relay::{RelayError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: UpstreamClient,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = UpstreamClient::new(&config.upstream)?;
        let config = Arc::new(config);

        let state = AppState {
            config: config.clone(),
            client,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the routing table with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", endpoint(get(pages::index)))
            .route("/index.html", endpoint(get(pages::index)))
            .route("/api/health", endpoint(get(pages::health)))
            .route("/api/proxy", endpoint(post(proxy::proxy_handler)))
            .fallback(pages::fallback)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id = %req.headers().request_id().unwrap_or("unknown")
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_ORIGIN,
                        ALLOW_ORIGIN,
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_METHODS,
                        ALLOW_METHODS,
                    ))
                    .layer(SetResponseHeaderLayer::overriding(
                        header::ACCESS_CONTROL_ALLOW_HEADERS,
                        ALLOW_HEADERS,
                    ))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Every route answers OPTIONS with a preflight and any other
/// unregistered method, HEAD included, with 404.
fn endpoint(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .head(pages::not_found)
        .options(pages::preflight)
        .fallback(pages::not_found)
}
