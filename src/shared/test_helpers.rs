#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::config::UploadsConfig;
#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::auth::model::Claims;
#[cfg(test)]
use crate::features::auth::TokenVerifier;
#[cfg(test)]
use crate::features::media::models::MediaResource;
#[cfg(test)]
use crate::features::media::repository::{KindScope, MediaRepository};
#[cfg(test)]
use crate::features::media::services::MediaService;

#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "test-portal-secret";

/// In-memory stand-in for the Postgres repository.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryMediaRepository {
    /// (owner email, owned object id)
    pub owners: Vec<(String, i64)>,
    pub media: Vec<MediaResource>,
}

#[cfg(test)]
#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn owner_has_object(&self, email: &str, object_id: i64) -> Result<bool> {
        Ok(self
            .owners
            .iter()
            .any(|(e, id)| e == email && *id == object_id))
    }

    async fn find_media(
        &self,
        object_id: i64,
        filename: &str,
        scope: KindScope,
    ) -> Result<Option<MediaResource>> {
        Ok(self
            .media
            .iter()
            .find(|m| {
                let in_scope = match scope {
                    KindScope::Panoramas => m.kind == "panorama",
                    KindScope::Files => m.kind != "panorama",
                };
                m.object_id == object_id && m.filename == filename && in_scope
            })
            .cloned())
    }
}

#[cfg(test)]
pub fn media_row(
    object_id: i64,
    filename: &str,
    kind: &str,
    mime_type: &str,
    visible: bool,
    file_path: Option<&str>,
) -> MediaResource {
    MediaResource {
        id: Uuid::new_v4(),
        object_id,
        filename: filename.to_string(),
        file_path: file_path.map(|p| p.to_string()),
        mime_type: mime_type.to_string(),
        kind: kind.to_string(),
        visible_to_customer: visible,
        created_at: Utc::now(),
    }
}

/// Mint a bearer token signed with the test secret.
#[cfg(test)]
pub fn staff_token(role: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = Claims {
        sub: "staff-1".to_string(),
        email: "staff@greenscape.example".to_string(),
        role: role.to_string(),
        exp: now + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A unique uploads root under the system temp directory.
#[cfg(test)]
pub fn temp_uploads_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("greenscape-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&root).unwrap();
    root
}

#[cfg(test)]
pub fn test_media_service(
    repository: InMemoryMediaRepository,
    uploads_root: PathBuf,
) -> Arc<MediaService> {
    Arc::new(MediaService::new(
        Arc::new(repository),
        Arc::new(TokenVerifier::new(TEST_JWT_SECRET, Duration::from_secs(60))),
        UploadsConfig {
            root_dir: uploads_root,
        },
    ))
}
