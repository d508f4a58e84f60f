use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::bearer;
use crate::features::media::dtos::CustomerQuery;
use crate::features::media::repository::KindScope;
use crate::features::media::sanitize;
use crate::features::media::services::MediaService;

/// Retrieve an object's photo, document or 3D model file
///
/// Customers authorize via the `email` query parameter and only see media
/// flagged visible; staff authorize via a bearer token and see everything
/// within the object.
#[utoipa::path(
    get,
    path = "/api/uploads/objects/{object_id}/{filename}",
    tag = "media",
    params(
        ("object_id" = String, Path, description = "Object identifier"),
        ("filename" = String, Path, description = "Stored media filename"),
        CustomerQuery,
    ),
    responses(
        (status = 200, description = "Media file bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 400, description = "Invalid object id, filename or email"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Not found or not authorized")
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_object_media(
    State(service): State<Arc<MediaService>>,
    Path((object_id, filename)): Path<(String, String)>,
    Query(query): Query<CustomerQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve_media(service, object_id, filename, query, headers, KindScope::Files).await
}

/// Retrieve an object's panorama
///
/// Same authorization rules as the flat media endpoint; panoramas are served
/// with `Cache-Control: no-store` because admins toggle their visibility and
/// a shared cache entry must never conflate the staff and customer views.
#[utoipa::path(
    get,
    path = "/api/uploads/objects/{object_id}/panoramas/{filename}",
    tag = "media",
    params(
        ("object_id" = String, Path, description = "Object identifier"),
        ("filename" = String, Path, description = "Stored panorama filename"),
        CustomerQuery,
    ),
    responses(
        (status = 200, description = "Panorama file bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 400, description = "Invalid object id, filename or email"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Not found or not authorized")
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_object_panorama(
    State(service): State<Arc<MediaService>>,
    Path((object_id, filename)): Path<(String, String)>,
    Query(query): Query<CustomerQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve_media(
        service,
        object_id,
        filename,
        query,
        headers,
        KindScope::Panoramas,
    )
    .await
}

/// Shared pipeline for both endpoints:
/// sanitize → resolve caller → authorize/locate/guard/read → respond.
async fn serve_media(
    service: Arc<MediaService>,
    raw_object_id: String,
    raw_filename: String,
    query: CustomerQuery,
    headers: HeaderMap,
    scope: KindScope,
) -> Result<Response, AppError> {
    let requester = describe_requester(&headers, query.email.as_deref());

    let object_id = sanitize::parse_object_id(&raw_object_id, &requester)?;
    let filename = sanitize::sanitize_filename(&raw_filename, &requester)?;

    let caller = service.resolve_caller(&headers, &query)?;
    let media = service.fetch(&caller, object_id, &filename, scope).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media.content_type)
        .header(header::CONTENT_LENGTH, media.bytes.len())
        .header(header::CACHE_CONTROL, media.cache_control)
        .body(Body::from(media.bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build media response: {}", e)))
}

/// Requester description for security-event logs, built before any
/// authorization has run.
fn describe_requester(headers: &HeaderMap, email: Option<&str>) -> String {
    match (bearer::bearer_token(headers), email) {
        (Some(_), _) => "bearer".to_string(),
        (None, Some(email)) => format!("email:{}", email),
        (None, None) => "anonymous".to_string(),
    }
}
