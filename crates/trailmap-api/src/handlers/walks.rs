use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geojson::FeatureCollection;
use trailmap_core::models::WalkInfo;

use super::blocking;
use crate::dto::WalkMarkersResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_walks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    tracing::info!("Listing walks");

    let walks = blocking(move || state.walks.list_walks()).await?;
    Ok(Json(walks))
}

pub async fn walk_info(
    State(state): State<Arc<AppState>>,
    Path(walk_id): Path<String>,
) -> Result<Json<WalkInfo>, ApiError> {
    let info = blocking(move || state.walks.walk_info(&walk_id)).await?;
    Ok(Json(info))
}

pub async fn walk_markers(
    State(state): State<Arc<AppState>>,
    Path(walk_id): Path<String>,
) -> Result<Json<WalkMarkersResponse>, ApiError> {
    Ok(Json(layout_walk(state, walk_id).await?))
}

pub async fn walk_geojson(
    State(state): State<Arc<AppState>>,
    Path(walk_id): Path<String>,
) -> Result<Json<FeatureCollection>, ApiError> {
    Ok(Json(layout_walk(state, walk_id).await?.to_geojson()))
}

/// Load a walk and place its image markers in settings order
async fn layout_walk(state: Arc<AppState>, walk_id: String) -> Result<WalkMarkersResponse, ApiError> {
    blocking(move || {
        let walk = state.walks.load_walk(&walk_id)?;
        let placed = state.placer.place_all(&walk.trail_path, walk.marker_points())?;

        tracing::info!(walk = %walk.id, markers = placed.len(), "Placed walk markers");
        Ok(WalkMarkersResponse::new(walk, placed))
    })
    .await
}
