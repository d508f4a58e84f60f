use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::time::Duration;

use super::model::{Claims, StaffRole, StaffUser};
use crate::core::error::AppError;

/// Verifies portal-issued staff bearer tokens (HS256, shared secret).
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    /// Decode and validate a bearer token into a staff caller.
    ///
    /// Fails with `AppError::Auth` when the signature, expiry, or role claim
    /// does not check out. A valid token with a non-staff role is rejected
    /// here too: only admin/master tokens grant the staff view.
    pub fn verify_staff(&self, token: &str) -> Result<StaffUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        let role = StaffRole::parse(&claims.role)
            .ok_or_else(|| AppError::Auth("Token does not carry a staff role".to_string()))?;

        Ok(StaffUser {
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";

    fn mint(role: &str, exp_offset_secs: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            sub: "staff-1".to_string(),
            email: "staff@greenscape.example".to_string(),
            role: role.to_string(),
            exp: (now + exp_offset_secs).max(0) as u64,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_accepts_admin_and_master_tokens() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(60));

        let user = verifier.verify_staff(&mint("ADMIN", 3600)).unwrap();
        assert_eq!(user.role, StaffRole::Admin);

        let user = verifier.verify_staff(&mint("master", 3600)).unwrap();
        assert_eq!(user.role, StaffRole::Master);
    }

    #[test]
    fn test_rejects_non_staff_role() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(60));
        assert!(verifier.verify_staff(&mint("CUSTOMER", 3600)).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(0));
        assert!(verifier.verify_staff(&mint("ADMIN", -3600)).is_err());
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let verifier = TokenVerifier::new("other-secret", Duration::from_secs(60));
        assert!(verifier.verify_staff(&mint("ADMIN", 3600)).is_err());
    }
}
