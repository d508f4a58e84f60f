use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of staff roles. Anything not listed here is not staff,
/// regardless of what the token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StaffRole {
    Admin,
    Master,
}

impl StaffRole {
    /// Parse a raw role claim. Tokens in the wild carry the role both
    /// upper- and lowercase, so matching is case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(StaffRole::Admin),
            "MASTER" => Some(StaffRole::Master),
            _ => None,
        }
    }
}

/// A verified staff caller. Staff bypass the customer visibility flag but
/// still only act within the requested object's scope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffUser {
    pub email: String,
    pub role: StaffRole,
}

/// Raw claim set carried by portal-issued bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known_roles() {
        assert_eq!(StaffRole::parse("ADMIN"), Some(StaffRole::Admin));
        assert_eq!(StaffRole::parse("MASTER"), Some(StaffRole::Master));
        assert_eq!(StaffRole::parse("admin"), Some(StaffRole::Admin));
        assert_eq!(StaffRole::parse("Master"), Some(StaffRole::Master));
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(StaffRole::parse("CUSTOMER"), None);
        assert_eq!(StaffRole::parse("superadmin"), None);
        assert_eq!(StaffRole::parse(""), None);
    }
}
