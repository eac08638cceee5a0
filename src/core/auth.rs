//! Authentication primitives
//!
//! Tokens are HS256 JWTs signed with the configured secret. Handlers never
//! see the raw token; the bearer middleware verifies it and attaches an
//! [`AuthContext`] to the request.

use crate::config::AuthConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: u32,
    pub username: String,
    pub role: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

/// Token failures
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime of {minutes} minutes is out of range")]
    Lifetime { minutes: i64 },
}

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: u32,
        username: String,
        role: String,
    },

    /// No authentication (auth disabled or public route)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<u32> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::User { role, .. } if role == "admin")
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        AuthContext::User {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Sign a token for the given user
pub fn issue_token(
    config: &AuthConfig,
    user_id: u32,
    username: &str,
    role: &str,
) -> Result<String, TokenError> {
    let minutes = config.token_ttl_minutes;
    let expires_at = Duration::try_minutes(minutes)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or(TokenError::Lifetime { minutes })?;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verify signature and expiry, returning the claims
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            enabled: true,
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 5,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let token = issue_token(&config(), 42, "alice", "admin").unwrap();
        let claims = verify_token(&config(), &token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&config(), 1, "bob", "customer").unwrap();
        let mut other = config();
        other.jwt_secret = "another-secret".to_string();

        assert!(matches!(
            verify_token(&other, &token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut expired = config();
        expired.token_ttl_minutes = -10;
        let token = issue_token(&expired, 1, "bob", "customer").unwrap();

        assert!(verify_token(&config(), &token).is_err());
    }

    #[test]
    fn test_overflowing_lifetime_is_an_error() {
        let mut huge = config();
        huge.token_ttl_minutes = 1_000_000_000_000;

        assert!(matches!(
            issue_token(&huge, 1, "bob", "customer"),
            Err(TokenError::Lifetime { .. })
        ));

        huge.token_ttl_minutes = i64::MIN;
        assert!(issue_token(&huge, 1, "bob", "customer").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token(&config(), "not.a.jwt").is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_auth_context_from_claims() {
        let ctx = AuthContext::from(Claims {
            sub: 9,
            username: "carol".to_string(),
            role: "admin".to_string(),
            exp: 0,
        });

        assert_eq!(ctx.user_id(), Some(9));
        assert!(ctx.is_admin());
        assert!(!AuthContext::Anonymous.is_admin());
    }
}
