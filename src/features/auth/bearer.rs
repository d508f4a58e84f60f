use axum::http::{header, HeaderMap};

/// Extract the bearer token from the Authorization header, if any.
///
/// The scheme prefix is matched case-insensitively; historically some portal
/// clients sent "bearer" lowercase and the per-endpoint parsers disagreed on
/// whether to accept it. This helper is the single place that decides.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_accepts_standard_and_lowercase_scheme() {
        assert_eq!(
            bearer_token(&headers_with_auth("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(
            bearer_token(&headers_with_auth("bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers_with_auth("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers_with_auth("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
