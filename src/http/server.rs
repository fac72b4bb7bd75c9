//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all contact handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop gracefully when the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::contacts::ContactService;
use crate::http::handlers;
use crate::http::request::{self, RequestIdExt};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::storage::JsonFileStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
}

/// HTTP server for the contact API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server backed by the JSON file named in `config.storage`.
    pub fn new(config: ServiceConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.storage.path.clone()));
        Self::with_service(config, Arc::new(ContactService::new(store)))
    }

    /// Create a server around an existing service.
    pub fn with_service(config: ServiceConfig, contacts: Arc<ContactService>) -> Self {
        let state = AppState { contacts };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::get_health))
            .route(
                "/contacts",
                get(handlers::list_contacts).post(handlers::create_contact),
            )
            .route(
                "/contacts/",
                get(handlers::list_contacts).post(handlers::create_contact),
            )
            .route("/contacts/summary", get(handlers::get_summary))
            .route("/contacts/search", get(handlers::search_contacts))
            .route("/contacts/email-providers", get(handlers::get_email_providers))
            .route(
                "/contacts/{id}",
                get(handlers::get_contact)
                    .put(handlers::update_contact)
                    .delete(handlers::delete_contact),
            )
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(request::set_request_id_layer())
    }

    /// A clone of the fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            storage = %self.config.storage.path.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Records count and latency per matched route.
async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
