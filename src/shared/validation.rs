use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Syntactic email check for the customer `?email=` query parameter.
    /// Intentionally loose: the authorizer treats the address as an opaque
    /// account key, this only filters obvious garbage before a DB round trip.
    /// - Valid: "owner@example.com", "a.b+c@sub.domain.io"
    /// - Invalid: "owner", "@example.com", "owner@", "a b@example.com"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}
