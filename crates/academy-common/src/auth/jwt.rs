//! Access-token verification
//!
//! Tokens are issued by the external identity provider and signed with a shared
//! HS256 secret. The subject is the user's id. `issue` mints equivalent tokens
//! for local tooling and tests.

use academy_core::EntityId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Email asserted by the identity provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid id
    pub fn user_id(&self) -> Result<EntityId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Verifies (and for tooling, issues) HS256 access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create a service for the given shared secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Mint a token for `user_id` valid for `ttl_seconds`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(
        &self,
        user_id: EntityId,
        email: Option<String>,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            email,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a token, returning its claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or has a malformed subject
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        token_data.claims.user_id()?;
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough")
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let user_id = EntityId::generate();

        let token = service
            .issue(user_id, Some("learner@example.com".to_string()), 900)
            .unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email.as_deref(), Some("learner@example.com"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let token = service.issue(EntityId::generate(), None, -3600).unwrap();
        assert!(matches!(service.validate(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let token = service().issue(EntityId::generate(), None, 900).unwrap();
        let other = JwtService::new("a-completely-different-secret");
        assert!(matches!(other.validate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().validate("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let claims = Claims {
            sub: "12345".to_string(),
            iat: 0,
            exp: i64::MAX,
            email: None,
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
