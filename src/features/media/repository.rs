use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::Result;

use super::models::MediaResource;

/// Which slice of the media table an endpoint may see. The flat endpoint
/// serves photos, documents and 3D models; panoramas have their own URL and
/// cache policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindScope {
    Panoramas,
    Files,
}

/// Narrow datastore interface consumed by the media service.
///
/// The process-wide `PgPool` lives behind this trait so handlers depend on
/// the interface rather than a free-floating client; tests swap in an
/// in-memory implementation.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Whether the account with this email owns the given object.
    async fn owner_has_object(&self, email: &str, object_id: i64) -> Result<bool>;

    /// Media row for (object, filename) within the endpoint's kind scope.
    async fn find_media(
        &self,
        object_id: i64,
        filename: &str,
        scope: KindScope,
    ) -> Result<Option<MediaResource>>;
}

pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    async fn owner_has_object(&self, email: &str, object_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM objects o
                JOIN owners w ON w.id = o.owner_id
                WHERE w.email = $1 AND o.id = $2
            )
            "#,
        )
        .bind(email)
        .bind(object_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_media(
        &self,
        object_id: i64,
        filename: &str,
        scope: KindScope,
    ) -> Result<Option<MediaResource>> {
        let query = match scope {
            KindScope::Panoramas => {
                r#"
                SELECT id, object_id, filename, file_path, mime_type, kind,
                       visible_to_customer, created_at
                FROM media_resources
                WHERE object_id = $1 AND filename = $2 AND kind = 'panorama'
                "#
            }
            KindScope::Files => {
                r#"
                SELECT id, object_id, filename, file_path, mime_type, kind,
                       visible_to_customer, created_at
                FROM media_resources
                WHERE object_id = $1 AND filename = $2 AND kind <> 'panorama'
                "#
            }
        };

        let row = sqlx::query_as::<_, MediaResource>(query)
            .bind(object_id)
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}
