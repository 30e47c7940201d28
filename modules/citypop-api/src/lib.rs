use std::sync::Arc;

use axum::{routing::get, Router};

use citypop_store::CityStore;

pub mod rest;

pub struct AppState {
    pub store: Arc<dyn CityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CityStore>) -> Self {
        Self { store }
    }
}

/// All routes with CORS and request tracing applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "Hello, World!" }))
        // REST API
        .route("/api/data/getAll", get(rest::api_get_all))
        .with_state(state)
        // The dashboard is served from another origin
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
