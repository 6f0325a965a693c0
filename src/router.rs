use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// The full HTTP surface, shared by the server binary and the tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::ping))
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health))
        .route("/api/book", post(handlers::booking::book))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/confirm/:reference",
            post(handlers::admin::confirm_booking),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
