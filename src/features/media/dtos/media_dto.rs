use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::shared::validation::EMAIL_REGEX;

/// Query parameters for customer-path media retrieval.
///
/// `email` identifies the customer account and is required unless the request
/// carries a valid staff bearer token.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct CustomerQuery {
    /// Customer account email owning the requested object
    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email format"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_and_absent_email_pass() {
        let query = CustomerQuery {
            email: Some("owner@example.com".to_string()),
        };
        assert!(query.validate().is_ok());

        let query = CustomerQuery { email: None };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_malformed_email_fails() {
        let query = CustomerQuery {
            email: Some("not-an-email".to_string()),
        };
        assert!(query.validate().is_err());
    }
}
