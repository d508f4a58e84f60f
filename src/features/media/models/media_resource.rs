use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::{CACHE_CONTROL_IMMUTABLE, CACHE_CONTROL_NO_STORE};

/// The kinds of media attached to a customer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Photo,
    Panorama,
    Document,
    Model3d,
}

impl ResourceKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "photo" => Some(ResourceKind::Photo),
            "panorama" => Some(ResourceKind::Panorama),
            "document" => Some(ResourceKind::Document),
            "model3d" => Some(ResourceKind::Model3d),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Photo => "photo",
            ResourceKind::Panorama => "panorama",
            ResourceKind::Document => "document",
            ResourceKind::Model3d => "model3d",
        }
    }

    /// Directory segment under the per-object uploads directory.
    /// Photos live directly in the object directory, hence the empty segment.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Photo => "",
            ResourceKind::Panorama => "panoramas",
            ResourceKind::Document => "documents",
            ResourceKind::Model3d => "models",
        }
    }

    /// Cache policy for served bytes. Panorama visibility is toggled by
    /// admins between requests, so panoramas must never be cached; everything
    /// else is write-once on disk.
    pub fn cache_control(&self) -> &'static str {
        match self {
            ResourceKind::Panorama => CACHE_CONTROL_NO_STORE,
            _ => CACHE_CONTROL_IMMUTABLE,
        }
    }
}

/// Database model for uploaded media attached to an object.
#[derive(Debug, Clone, FromRow)]
pub struct MediaResource {
    pub id: Uuid,
    pub object_id: i64,
    pub filename: String,
    /// Explicit relative path under the uploads root. NULL for rows created
    /// before the column existed; those resolve via the conventional layout.
    pub file_path: Option<String>,
    pub mime_type: String,
    pub kind: String,
    pub visible_to_customer: bool,
    pub created_at: DateTime<Utc>,
}

impl MediaResource {
    /// Kind of this row. Unknown values fall back to Photo, which is the
    /// strictest base directory (no extra segment) and immutable caching.
    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::parse(&self.kind).unwrap_or(ResourceKind::Photo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ResourceKind::Photo,
            ResourceKind::Panorama,
            ResourceKind::Document,
            ResourceKind::Model3d,
        ] {
            assert_eq!(ResourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::parse("video"), None);
    }

    #[test]
    fn test_cache_policy_per_kind() {
        assert_eq!(ResourceKind::Panorama.cache_control(), CACHE_CONTROL_NO_STORE);
        assert_eq!(ResourceKind::Photo.cache_control(), CACHE_CONTROL_IMMUTABLE);
        assert_eq!(ResourceKind::Document.cache_control(), CACHE_CONTROL_IMMUTABLE);
        assert_eq!(ResourceKind::Model3d.cache_control(), CACHE_CONTROL_IMMUTABLE);
    }
}
