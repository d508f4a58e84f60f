use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::config::UploadsConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::{bearer, model::StaffUser, TokenVerifier};
use crate::features::media::dtos::CustomerQuery;
use crate::features::media::models::MediaResource;
use crate::features::media::paths;
use crate::features::media::repository::{KindScope, MediaRepository};
use crate::shared::constants::FALLBACK_MIME_TYPE;

/// Who is asking for a media resource.
#[derive(Debug, Clone)]
pub enum CallerContext {
    /// Verified admin/master token; sees everything within the object scope.
    Staff(StaffUser),
    /// Anonymous customer identified only by account email; sees owned,
    /// customer-visible media.
    Customer(String),
}

/// An authorized, guarded, read media file ready to be written out.
pub struct ServedMedia {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub cache_control: &'static str,
}

/// Service for the access-controlled media retrieval path.
pub struct MediaService {
    repository: Arc<dyn MediaRepository>,
    verifier: Arc<TokenVerifier>,
    uploads: UploadsConfig,
}

impl MediaService {
    pub fn new(
        repository: Arc<dyn MediaRepository>,
        verifier: Arc<TokenVerifier>,
        uploads: UploadsConfig,
    ) -> Self {
        Self {
            repository,
            verifier,
            uploads,
        }
    }

    /// Resolve the caller context for a request.
    ///
    /// A valid staff bearer token wins and bypasses the email check entirely.
    /// An invalid or non-staff token is logged and ignored so that a stale
    /// admin session with a customer email link still works; without a token
    /// the email parameter is mandatory and must be syntactically valid.
    pub fn resolve_caller(
        &self,
        headers: &HeaderMap,
        query: &CustomerQuery,
    ) -> Result<CallerContext> {
        if let Some(token) = bearer::bearer_token(headers) {
            match self.verifier.verify_staff(token) {
                Ok(user) => return Ok(CallerContext::Staff(user)),
                Err(e) => debug!("Ignoring bearer token without staff access: {}", e),
            }
        }

        query
            .validate()
            .map_err(|_| AppError::InvalidEmail("Invalid email format".to_string()))?;

        match query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Ok(CallerContext::Customer(email.to_string())),
            None => Err(AppError::InvalidEmail(
                "Email query parameter is required".to_string(),
            )),
        }
    }

    /// Fetch an authorized media file: authorize → locate → guard → read.
    pub async fn fetch(
        &self,
        caller: &CallerContext,
        object_id: i64,
        filename: &str,
        scope: KindScope,
    ) -> Result<ServedMedia> {
        let resource = self.authorize(caller, object_id, filename, scope).await?;

        let kind = resource.resource_kind();
        let relative = paths::relative_media_path(
            object_id,
            kind,
            &resource.filename,
            resource.file_path.as_deref(),
        );
        let base = paths::base_dir(&self.uploads.root_dir, object_id, kind);
        let absolute = paths::resolve_guarded(&self.uploads.root_dir, &base, &relative)?;

        let bytes = match tokio::fs::read(&absolute).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(
                    object_id,
                    filename = %resource.filename,
                    path = %absolute.display(),
                    "Media row exists but backing file is missing from disk"
                );
                return Err(AppError::NotFoundOnDisk);
            }
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to read media file: {}",
                    e
                )))
            }
        };

        let content_type = match resource.mime_type.trim() {
            "" => FALLBACK_MIME_TYPE.to_string(),
            mime => mime.to_string(),
        };

        Ok(ServedMedia {
            bytes,
            content_type,
            cache_control: kind.cache_control(),
        })
    }

    /// Decide ALLOW/DENY for (object, filename, caller).
    ///
    /// Every DENY is `NotFound`: a customer probing someone else's object,
    /// a hidden resource and a nonexistent one all answer identically.
    async fn authorize(
        &self,
        caller: &CallerContext,
        object_id: i64,
        filename: &str,
        scope: KindScope,
    ) -> Result<MediaResource> {
        match caller {
            CallerContext::Staff(user) => {
                debug!(object_id, filename, role = ?user.role, "Staff media access");
                self.repository
                    .find_media(object_id, filename, scope)
                    .await?
                    .ok_or(AppError::NotFound)
            }
            CallerContext::Customer(email) => {
                if !self.repository.owner_has_object(email, object_id).await? {
                    return Err(AppError::NotFound);
                }

                let resource = self
                    .repository
                    .find_media(object_id, filename, scope)
                    .await?
                    .ok_or(AppError::NotFound)?;

                if !resource.visible_to_customer {
                    debug!(object_id, filename, "Hidden resource requested by owner");
                    return Err(AppError::NotFound);
                }

                Ok(resource)
            }
        }
    }
}
