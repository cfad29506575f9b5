use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use procdash_core::{DashConfig, Result, RouteGuard};

use crate::guard::route_guard_middleware;
use crate::upstream::Upstream;
use crate::{api, assets, pages};

/// State shared across the API proxy handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<Upstream>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// The dashboard HTTP server.
pub struct DashServer {
    config: DashConfig,
    guard: Arc<RouteGuard>,
    state: AppState,
}

impl DashServer {
    /// Create a new server from configuration.
    pub fn new(config: DashConfig) -> Result<Self> {
        let guard = Arc::new(RouteGuard::new(config.guard.clone()));
        let upstream = Arc::new(Upstream::new(&config.upstream)?);

        Ok(Self {
            config,
            guard,
            state: AppState { upstream },
        })
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        // Build CORS layer
        let cors = if self.config.server.cors_enabled {
            if self.config.server.cors_origins.contains(&"*".to_string()) {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            } else {
                let origins: Vec<_> = self
                    .config
                    .server
                    .cors_origins
                    .iter()
                    .filter_map(|o| o.parse().ok())
                    .collect();
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        } else {
            CorsLayer::new()
        };

        let api = Router::new()
            .route("/api/auth/login", post(api::login))
            .route("/api/auth/logout", get(api::logout))
            .route("/api/dashboard/processes", get(api::list_processes))
            .route(
                "/api/dashboard/process-by-id/{uuid}",
                get(api::process_by_id),
            )
            .route("/api/dashboard/process/start", post(api::start_process))
            .route("/api/dashboard/process/stop", post(api::stop_process))
            .route("/api/dashboard/process/restart", post(api::restart_process))
            .route("/api/dashboard/process/{name}", get(api::process_metadata))
            .route(
                "/api/dashboard/process/{name}/update-meta-data",
                put(api::update_metadata),
            )
            .with_state(self.state.clone());

        Router::new()
            // Pages
            .route("/", get(pages::index))
            .route("/auth/login", get(pages::login))
            .route("/dashboard/home", get(pages::home))
            .route("/dashboard/details", get(pages::details))
            // Static assets
            .route("/assets/styles.css", get(assets::styles_css))
            .route("/assets/main.js", get(assets::main_js))
            // Health check endpoint
            .route("/health", get(health_handler))
            // Supervisor API proxy
            .merge(api)
            // Middleware
            // Request-id sits outermost so even guard-issued redirects
            // carry the header.
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(request_id_middleware))
                    .layer(cors)
                    .layer(middleware::from_fn_with_state(
                        self.guard.clone(),
                        route_guard_middleware,
                    )),
            )
    }

    /// Get the socket address to bind to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.server.port))
    }

    /// Run the server (blocking).
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!("Dashboard server listening on {}", addr);
        tracing::info!(
            upstream = %self.config.upstream.base_url,
            "proxying /api/* to supervisor backend"
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await
    }
}

/// Health check handler.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Attach a request ID to every request and response.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::http::header::HeaderName;

    let request_id = req
        .headers()
        .get(HeaderName::from_static("x-request-id"))
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut response = next.run(req).await;

    if let Ok(val) = request_id.parse() {
        response.headers_mut().insert("x-request-id", val);
    }

    response
}
