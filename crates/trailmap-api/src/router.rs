use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Walks
        .route("/api/walks", get(handlers::list_walks))
        .route("/api/walk-info/{walk_id}", get(handlers::walk_info))
        .route("/api/walks/{walk_id}/markers", get(handlers::walk_markers))
        .route("/api/walks/{walk_id}/geojson", get(handlers::walk_geojson))

        // Derived image assets
        .route("/thumbnail/{walk_id}/{image}", get(handlers::scoped_thumbnail))
        .route("/thumbnail/{image}", get(handlers::thumbnail))
        .route("/image-info/{walk_id}/{image}", get(handlers::scoped_image_info))
        .route("/image-info/{image}", get(handlers::image_info))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
