use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::time::Duration;

use super::claims::TokenClaims;

/// Time-bounded cache mapping a credential to previously resolved claims.
///
/// Entries are keyed by a SHA-256 digest of the raw credential so the token
/// itself is never held as a lookup key, and expire after a fixed TTL with no
/// explicit invalidation path (there is no logout).
#[derive(Clone)]
pub struct SessionCache {
    inner: Cache<String, TokenClaims>,
}

impl SessionCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, token: &str) -> Option<TokenClaims> {
        self.inner.get(&Self::cache_key(token)).await
    }

    pub async fn insert(&self, token: &str, claims: TokenClaims) {
        self.inner.insert(Self::cache_key(token), claims).await;
    }

    fn cache_key(token: &str) -> String {
        format!("session:{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> TokenClaims {
        TokenClaims {
            sub: sub.to_string(),
            email: format!("{sub}@example.com"),
            email_verified: true,
            aud: "client".to_string(),
        }
    }

    #[tokio::test]
    async fn test_hit_after_insert() {
        let cache = SessionCache::new(10, Duration::from_secs(3600));
        cache.insert("token-a", claims("user-a")).await;

        let hit = cache.get("token-a").await.unwrap();
        assert_eq!(hit.sub, "user-a");
        assert!(cache.get("token-b").await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = SessionCache::new(10, Duration::from_millis(50));
        cache.insert("token-a", claims("user-a")).await;
        assert!(cache.get("token-a").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get("token-a").await.is_none());
    }

    #[test]
    fn test_cache_key_is_a_digest() {
        let key = SessionCache::cache_key("secret-token");
        assert!(!key.contains("secret-token"));
        assert_eq!(key, SessionCache::cache_key("secret-token"));
        assert_ne!(key, SessionCache::cache_key("other-token"));
    }
}
