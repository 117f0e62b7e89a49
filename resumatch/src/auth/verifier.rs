use crate::config::AuthConfig;
use crate::error::{AppError, Result};

use super::claims::TokenClaims;

/// Calls the identity provider's token-introspection endpoint.
#[derive(Clone)]
pub struct TokenVerifier {
    http: reqwest::Client,
    tokeninfo_url: String,
    expected_audience: Option<String>,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokeninfo_url: config.tokeninfo_url.clone(),
            expected_audience: config.expected_audience.clone(),
        }
    }

    /// Introspect a credential. Transport failures and non-200 statuses are
    /// both `Unauthorized`; a 200 with an unreadable body is `Internal`.
    pub async fn verify(&self, token: &str) -> Result<TokenClaims> {
        let response = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|_| AppError::Unauthorized("failed to verify token".to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized("invalid token".to_string()));
        }

        let claims: TokenClaims = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("failed to parse token info: {e}")))?;

        if let Some(ref expected) = self.expected_audience {
            if claims.aud != *expected {
                return Err(AppError::Unauthorized(
                    "token audience mismatch".to_string(),
                ));
            }
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier_for(server: &MockServer) -> TokenVerifier {
        TokenVerifier::new(&AuthConfig {
            tokeninfo_url: format!("{}/tokeninfo", server.uri()),
            expected_audience: None,
            session_ttl_secs: 3600,
            session_capacity: 100,
        })
    }

    #[tokio::test]
    async fn test_verify_passes_token_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .and(query_param("id_token", "raw-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "user-1",
                "email": "a@b.c",
                "email_verified": true,
                "aud": "client"
            })))
            .mount(&server)
            .await;

        let claims = verifier_for(&server).verify("raw-token").await.unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[tokio::test]
    async fn test_verify_malformed_body_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = verifier_for(&server).verify("tok").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_verify_transport_failure_is_unauthorized() {
        let verifier = TokenVerifier::new(&AuthConfig {
            // Nothing listens here.
            tokeninfo_url: "http://127.0.0.1:1/tokeninfo".to_string(),
            expected_audience: None,
            session_ttl_secs: 3600,
            session_capacity: 100,
        });

        let err = verifier.verify("tok").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
