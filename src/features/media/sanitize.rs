//! First line of defense for the media endpoints: validates the raw object id
//! and filename taken from the URL before any datastore or filesystem work.
//!
//! Rejections are logged as security events with the requester attached.

use crate::core::error::AppError;

/// Parse a raw object id. Must be a positive integer.
pub fn parse_object_id(raw: &str, requester: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            tracing::warn!(
                event = "invalid_identifier",
                value = %raw,
                requester = %requester,
                "Rejected media request with a non-numeric or non-positive object id"
            );
            Err(AppError::InvalidIdentifier(
                "Object id must be a positive integer".to_string(),
            ))
        }
    }
}

/// Validate a raw filename from the URL.
///
/// Traversal-looking input (separators, `..`, leading slash) is treated as an
/// attack and answered with the same generic 403 the path guard uses, before
/// any lookup happens. Empty or NUL-containing names are plain bad requests.
pub fn sanitize_filename(raw: &str, requester: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.contains('\0') {
        tracing::warn!(
            event = "invalid_filename",
            value = %raw.escape_debug(),
            requester = %requester,
            "Rejected media request with an empty or NUL-containing filename"
        );
        return Err(AppError::InvalidFilename);
    }

    if trimmed.contains('/') || trimmed.contains('\\') || trimmed.contains("..") {
        tracing::warn!(
            event = "path_traversal",
            value = %raw.escape_debug(),
            requester = %requester,
            "Rejected media request with a traversal sequence in the filename"
        );
        return Err(AppError::PathTraversal);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_accepts_positive_integers() {
        assert_eq!(parse_object_id("42", "test").unwrap(), 42);
        assert_eq!(parse_object_id(" 7 ", "test").unwrap(), 7);
    }

    #[test]
    fn test_object_id_rejects_garbage() {
        for raw in ["0", "-3", "abc", "4.2", "", "42abc"] {
            assert!(matches!(
                parse_object_id(raw, "test"),
                Err(AppError::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn test_filename_accepts_plain_names() {
        assert_eq!(sanitize_filename("sunset.jpg", "test").unwrap(), "sunset.jpg");
        assert_eq!(
            sanitize_filename(" report 2024.pdf ", "test").unwrap(),
            "report 2024.pdf"
        );
    }

    #[test]
    fn test_filename_rejects_empty_and_nul() {
        assert!(matches!(
            sanitize_filename("   ", "test"),
            Err(AppError::InvalidFilename)
        ));
        assert!(matches!(
            sanitize_filename("a\0b.jpg", "test"),
            Err(AppError::InvalidFilename)
        ));
    }

    #[test]
    fn test_filename_rejects_traversal_sequences() {
        for raw in [
            "../../etc/passwd",
            "..\\..\\windows\\system32",
            "/etc/passwd",
            "a/b.jpg",
            "photo..jpg/../x",
            "..",
        ] {
            assert!(
                matches!(sanitize_filename(raw, "test"), Err(AppError::PathTraversal)),
                "expected traversal rejection for {raw:?}"
            );
        }
    }
}
