//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{convert, events, health};
use crate::middleware::logging::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Health check routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness))
        .route("/liveness", get(health::liveness));

    // Synchronous conversion, CORS handled by tower-http
    let convert_routes = Router::new()
        .route("/convert", post(convert::convert_code))
        .layer(create_cors_layer());

    // Event handler surfaces; CORS headers come from the event response itself
    let event_routes = Router::new()
        .route(
            "/api/convert",
            post(events::convert_event).options(events::convert_event),
        )
        .route("/events", post(events::invoke_event));

    Router::new()
        .merge(convert_routes)
        .merge(event_routes)
        .merge(health_routes)
        // Custom request logging with trace IDs
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Create CORS layer with permissive settings
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            axum::http::HeaderName::from_static(TRACE_ID_HEADER),
            axum::http::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}
