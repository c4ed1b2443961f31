//! HTTP adapters - REST API implementations.

pub mod club;

pub use club::{club_router, ClubAppState};

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builds the full application router with standard middleware applied.
pub fn app(state: ClubAppState, request_timeout: Duration) -> Router {
    club_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
}
