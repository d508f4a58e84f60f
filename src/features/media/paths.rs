//! Resource location and path confinement for served media.
//!
//! Two responsibilities, implemented once and reused by every resource kind:
//! mapping an authorized media row to a relative path (explicit stored path or
//! the conventional per-object layout), and re-validating the final resolved
//! path against its allow-listed base directory. The second check runs even
//! for datastore-supplied paths: a compromised or mis-populated `file_path`
//! column must not be able to walk out of the object's directory.

use std::path::{Component, Path, PathBuf};

use crate::core::error::AppError;
use crate::shared::constants::OBJECT_UPLOADS_PREFIX;

use super::models::ResourceKind;

/// Relative path (under the uploads root) for a media row.
///
/// A non-empty stored path wins, with leading slashes stripped so it joins
/// cleanly; otherwise the conventional layout is synthesized. Rows created
/// before the explicit-path column existed only have the convention.
pub fn relative_media_path(
    object_id: i64,
    kind: ResourceKind,
    filename: &str,
    stored_path: Option<&str>,
) -> String {
    match stored_path.map(str::trim) {
        Some(path) if !path.is_empty() => path.trim_start_matches('/').to_string(),
        _ => conventional_path(object_id, kind, filename),
    }
}

/// Conventional on-disk location: `uploads/objects/{id}/{segment}/{filename}`,
/// with no segment for photos.
pub fn conventional_path(object_id: i64, kind: ResourceKind, filename: &str) -> String {
    let segment = kind.path_segment();
    if segment.is_empty() {
        format!("{OBJECT_UPLOADS_PREFIX}/{object_id}/{filename}")
    } else {
        format!("{OBJECT_UPLOADS_PREFIX}/{object_id}/{segment}/{filename}")
    }
}

/// Allow-listed base directory for (object, kind) under the uploads root.
pub fn base_dir(root: &Path, object_id: i64, kind: ResourceKind) -> PathBuf {
    let mut dir = root.join(OBJECT_UPLOADS_PREFIX).join(object_id.to_string());
    let segment = kind.path_segment();
    if !segment.is_empty() {
        dir.push(segment);
    }
    dir
}

/// Resolve `relative` under `root` and require the normalized result to stay
/// strictly inside `base`. On escape the attempt is logged with full detail
/// and the caller gets the generic `PathTraversal` error.
pub fn resolve_guarded(root: &Path, base: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let joined = root.join(relative.trim_start_matches('/'));
    let resolved = normalize(&joined);
    let base = normalize(base);

    if resolved.starts_with(&base) && resolved != base {
        Ok(resolved)
    } else {
        tracing::warn!(
            event = "path_traversal",
            attempted = %joined.display(),
            base = %base.display(),
            "Resolved media path escapes its allow-listed base directory"
        );
        Err(AppError::PathTraversal)
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
/// The guard must run before any read, so the target may not exist yet and
/// `canonicalize` is not an option. A `..` at the front pops nothing and is
/// dropped, which keeps the result under the root and fails the prefix check.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_path_per_kind() {
        assert_eq!(
            conventional_path(42, ResourceKind::Photo, "sunset.jpg"),
            "uploads/objects/42/sunset.jpg"
        );
        assert_eq!(
            conventional_path(42, ResourceKind::Panorama, "garden.jpg"),
            "uploads/objects/42/panoramas/garden.jpg"
        );
        assert_eq!(
            conventional_path(7, ResourceKind::Document, "invoice.pdf"),
            "uploads/objects/7/documents/invoice.pdf"
        );
    }

    #[test]
    fn test_stored_path_wins_with_leading_slash_stripped() {
        let rel = relative_media_path(
            42,
            ResourceKind::Photo,
            "sunset.jpg",
            Some("/uploads/objects/42/sunset.jpg"),
        );
        assert_eq!(rel, "uploads/objects/42/sunset.jpg");
    }

    #[test]
    fn test_empty_stored_path_falls_back_to_convention() {
        for stored in [None, Some(""), Some("   ")] {
            let rel = relative_media_path(42, ResourceKind::Photo, "sunset.jpg", stored);
            assert_eq!(rel, "uploads/objects/42/sunset.jpg");
        }
    }

    #[test]
    fn test_explicit_and_fallback_paths_resolve_identically() {
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Panorama);

        let explicit = relative_media_path(
            42,
            ResourceKind::Panorama,
            "garden.jpg",
            Some("uploads/objects/42/panoramas/garden.jpg"),
        );
        let fallback = relative_media_path(42, ResourceKind::Panorama, "garden.jpg", None);

        let a = resolve_guarded(root, &base, &explicit).unwrap();
        let b = resolve_guarded(root, &base, &fallback).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_guard_accepts_path_inside_base() {
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Photo);
        let resolved = resolve_guarded(root, &base, "uploads/objects/42/sunset.jpg").unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("/srv/portal/public/uploads/objects/42/sunset.jpg")
        );
    }

    #[test]
    fn test_guard_rejects_dotdot_escape() {
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Photo);
        let result = resolve_guarded(root, &base, "uploads/objects/42/../../../etc/passwd");
        assert!(matches!(result, Err(AppError::PathTraversal)));
    }

    #[test]
    fn test_guard_rejects_cross_object_stored_path() {
        // Stays inside the uploads root but points at another object's media.
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Photo);
        let result = resolve_guarded(root, &base, "uploads/objects/43/secret.jpg");
        assert!(matches!(result, Err(AppError::PathTraversal)));
    }

    #[test]
    fn test_guard_rejects_cross_kind_stored_path() {
        // A photo row must not serve out of the panoramas directory.
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Panorama);
        let result = resolve_guarded(root, &base, "uploads/objects/42/sunset.jpg");
        assert!(matches!(result, Err(AppError::PathTraversal)));
    }

    #[test]
    fn test_guard_rejects_base_itself() {
        let root = Path::new("/srv/portal/public");
        let base = base_dir(root, 42, ResourceKind::Photo);
        let result = resolve_guarded(root, &base, "uploads/objects/42");
        assert!(matches!(result, Err(AppError::PathTraversal)));
    }

    #[test]
    fn test_normalize_handles_curdir_and_parentdir() {
        assert_eq!(
            normalize(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    }
}
