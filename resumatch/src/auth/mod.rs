//! Authentication gate: bearer-credential extraction, session caching, and
//! identity-provider token introspection.

mod claims;
mod middleware;
mod session;
mod verifier;

pub use claims::{AuthUser, TokenClaims};
pub use middleware::auth_middleware;
pub use session::SessionCache;
pub use verifier::TokenVerifier;

use std::time::Duration;

use crate::config::AuthConfig;
use crate::error::Result;

/// Validates inbound credentials, consulting the session cache before the
/// identity provider. One instance is built at startup and shared.
#[derive(Clone)]
pub struct AuthGate {
    pub(crate) sessions: SessionCache,
    pub(crate) verifier: TokenVerifier,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            sessions: SessionCache::new(
                config.session_capacity,
                Duration::from_secs(config.session_ttl_secs),
            ),
            verifier: TokenVerifier::new(config),
        }
    }

    /// Resolve a credential to an identity.
    ///
    /// Cached claims are trusted unconditionally; there is no expiry or
    /// audience re-check on hits, so the cache can outlive the credential's
    /// own validity window. On a miss the provider is called once, and only
    /// a successful verification is written back.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser> {
        if let Some(claims) = self.sessions.get(token).await {
            return Ok(AuthUser {
                subject: claims.sub,
                email: claims.email,
            });
        }

        let claims = self.verifier.verify(token).await?;
        self.sessions.insert(token, claims.clone()).await;

        Ok(AuthUser {
            subject: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gate_for(server: &MockServer, expected_audience: Option<String>) -> AuthGate {
        AuthGate::new(&AuthConfig {
            tokeninfo_url: format!("{}/tokeninfo", server.uri()),
            expected_audience,
            session_ttl_secs: 3600,
            session_capacity: 100,
        })
    }

    fn token_info_body() -> serde_json::Value {
        json!({
            "sub": "user-123",
            "email": "jane@example.com",
            "email_verified": "true",
            "aud": "client-abc"
        })
    }

    #[tokio::test]
    async fn test_verified_token_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .and(query_param("id_token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_info_body()))
            .expect(1)
            .mount(&server)
            .await;

        let gate = gate_for(&server, None);

        let first = gate.authenticate("tok-1").await.unwrap();
        assert_eq!(first.subject, "user-123");

        // Second call must be served from the cache; wiremock's expect(1)
        // fails the test if the provider is hit again.
        let second = gate.authenticate("tok-1").await.unwrap();
        assert_eq!(second.subject, first.subject);
        assert_eq!(second.email, first.email);
    }

    #[tokio::test]
    async fn test_failed_verification_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let gate = gate_for(&server, None);
        let err = gate.authenticate("bad-token").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(gate.sessions.get("bad-token").await.is_none());
    }

    #[tokio::test]
    async fn test_audience_mismatch_rejected_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_info_body()))
            .mount(&server)
            .await;

        let gate = gate_for(&server, Some("other-client".to_string()));
        let err = gate.authenticate("tok-1").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(gate.sessions.get("tok-1").await.is_none());
    }

    #[tokio::test]
    async fn test_audience_ignored_when_unset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_info_body()))
            .mount(&server)
            .await;

        let gate = gate_for(&server, None);
        assert!(gate.authenticate("tok-1").await.is_ok());
    }
}
