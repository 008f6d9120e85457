use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Session cookie claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: String,
}

/// Service for minting and validating session cookies (HS256).
///
/// Only constructed when a session secret is configured; without one the
/// service runs in legacy mode and never issues cookies.
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_secs: u64,
    remember_secs: u64,
}

impl SessionService {
    pub fn new(secret: &str, session_secs: u64, remember_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_secs,
            remember_secs,
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Option<Self> {
        auth.session_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|secret| Self::new(secret, auth.session_secs, auth.session_remember_secs))
    }

    /// Mint a session token. Returns the token and its lifetime in
    /// seconds, which doubles as the cookie Max-Age.
    pub fn issue(
        &self,
        username: Option<String>,
        remember: bool,
    ) -> Result<(String, u64), jsonwebtoken::errors::Error> {
        let lifetime = if remember {
            self.remember_secs
        } else {
            self.session_secs
        };
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            iat: now,
            exp: now + lifetime as i64,
            username,
            role: "admin".to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map(|token| (token, lifetime))
    }

    /// Validate signature and expiry, returning the decoded claims.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> SessionService {
        SessionService::new("test_secret_key_32_bytes_long!!", 3600, 86400)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let (token, lifetime) = service.issue(Some("ops".to_string()), false).unwrap();
        assert_eq!(lifetime, 3600);
        assert_eq!(token.split('.').count(), 3);

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.username.as_deref(), Some("ops"));
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_remember_extends_lifetime() {
        let service = create_test_service();
        let (_, short) = service.issue(None, false).unwrap();
        let (_, long) = service.issue(None, true).unwrap();
        assert_eq!(short, 3600);
        assert_eq!(long, 86400);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.validate("invalid.token.here").is_err());
        assert!(service.validate("").is_err());
        assert!(service.validate("a.b").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = create_test_service();
        let service2 = SessionService::new("different_secret_key_32_bytes!!", 3600, 86400);

        let (token, _) = service1.issue(None, false).unwrap();
        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        // Expired well past the default validation leeway.
        let now = Utc::now();
        let claims = SessionClaims {
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
            username: None,
            role: "admin".to_string(),
        };
        let encoding_key = EncodingKey::from_secret(b"test_secret_key_32_bytes_long!!");
        let token = encode(&Header::default(), &claims, &encoding_key).unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_from_config_requires_secret() {
        let mut auth = AuthConfig::default();
        assert!(SessionService::from_config(&auth).is_none());
        auth.session_secret = Some(String::new());
        assert!(SessionService::from_config(&auth).is_none());
        auth.session_secret = Some("secret".to_string());
        assert!(SessionService::from_config(&auth).is_some());
    }
}
