mod assets;
mod health;
mod walks;

pub use assets::{image_info, scoped_image_info, scoped_thumbnail, thumbnail};
pub use health::health_check;
pub use walks::{list_walks, walk_geojson, walk_info, walk_markers};

use crate::error::ApiError;

/// Run filesystem and image work off the async executor
async fn blocking<F, T>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> trailmap_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Blocking task failed");
            ApiError::internal("Internal error").with_details(e.to_string())
        })?
        .map_err(ApiError::from)
}
