//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, request bodies and
//! response structures.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendation", get(recommendation_handler))
        .route("/uv", post(reading_handler))
        .route("/uv/simulate", post(simulate_handler))
        .route("/uv/postcode", post(postcode_handler))
        .route("/uv/location", post(location_handler))
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/toggle", post(timer_toggle_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/timer/duration", post(timer_duration_handler))
        .route("/timer/custom", post(timer_custom_handler))
        .route("/timer/events", get(timer_events_handler))
        .route("/config/assets", get(assets_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
