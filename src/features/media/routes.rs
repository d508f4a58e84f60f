use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::media::handlers::{get_object_media, get_object_panorama};
use crate::features::media::services::MediaService;

/// Create routes for the media feature
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/uploads/objects/{object_id}/{filename}",
            get(get_object_media),
        )
        .route(
            "/api/uploads/objects/{object_id}/panoramas/{filename}",
            get(get_object_panorama),
        )
        .with_state(media_service)
}
