use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use trailmap_core::models::{ImageKey, ImageMetadata};

use super::blocking;
use crate::error::ApiError;
use crate::state::AppState;

const THUMBNAIL_CACHE_CONTROL: &str = "public, max-age=86400";

pub async fn scoped_thumbnail(
    State(state): State<Arc<AppState>>,
    Path((walk_id, image)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    serve_thumbnail(state, ImageKey::new(Some(&walk_id), &image)?).await
}

pub async fn thumbnail(
    State(state): State<Arc<AppState>>,
    Path(image): Path<String>,
) -> Result<Response, ApiError> {
    serve_thumbnail(state, ImageKey::new(None, &image)?).await
}

pub async fn scoped_image_info(
    State(state): State<Arc<AppState>>,
    Path((walk_id, image)): Path<(String, String)>,
) -> Result<Json<ImageMetadata>, ApiError> {
    serve_metadata(state, ImageKey::new(Some(&walk_id), &image)?).await
}

pub async fn image_info(
    State(state): State<Arc<AppState>>,
    Path(image): Path<String>,
) -> Result<Json<ImageMetadata>, ApiError> {
    serve_metadata(state, ImageKey::new(None, &image)?).await
}

async fn serve_thumbnail(state: Arc<AppState>, key: ImageKey) -> Result<Response, ApiError> {
    tracing::debug!(image = %key, "Thumbnail requested");

    let bytes = blocking(move || state.cache.thumbnail(&key)).await?;

    Ok((
        [(header::CONTENT_TYPE, "image/jpeg"), (header::CACHE_CONTROL, THUMBNAIL_CACHE_CONTROL)],
        bytes,
    )
        .into_response())
}

async fn serve_metadata(state: Arc<AppState>, key: ImageKey) -> Result<Json<ImageMetadata>, ApiError> {
    tracing::debug!(image = %key, "Image info requested");

    let metadata = blocking(move || state.cache.metadata(&key)).await?;
    Ok(Json(metadata))
}
