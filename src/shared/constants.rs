/// Cache-Control for media that is never mutated in place once uploaded
/// (photos, documents, 3D models).
pub const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Cache-Control for media whose visibility or content can change between
/// requests and must always be re-authorized (panoramas). Admin and customer
/// views must never be conflated by a shared cache entry.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// MIME type served when a media row has no stored content type.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Conventional on-disk prefix for per-object media directories,
/// relative to the uploads root.
pub const OBJECT_UPLOADS_PREFIX: &str = "uploads/objects";
