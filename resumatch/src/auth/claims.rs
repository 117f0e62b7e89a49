use serde::{Deserialize, Deserializer, Serialize};

/// Claims returned by the identity provider's token-introspection endpoint.
///
/// `email_verified` arrives as the string `"true"`/`"false"` from some
/// providers and as a real boolean from others; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "bool_or_string")]
    pub email_verified: bool,
    #[serde(default)]
    pub aud: String,
}

/// The identity attached to an authenticated request. `subject` is the only
/// value downstream authorization keys on.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub email: String,
}

fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Str(s) => s.eq_ignore_ascii_case("true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_verified_as_string() {
        let claims: TokenClaims = serde_json::from_str(
            r#"{"sub":"s","email":"e@x.com","email_verified":"true","aud":"a"}"#,
        )
        .unwrap();
        assert!(claims.email_verified);
    }

    #[test]
    fn test_email_verified_as_bool() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"s","email_verified":false}"#).unwrap();
        assert!(!claims.email_verified);
        assert_eq!(claims.email, "");
        assert_eq!(claims.aud, "");
    }

    #[test]
    fn test_missing_sub_is_an_error() {
        let result: Result<TokenClaims, _> = serde_json::from_str(r#"{"email":"e@x.com"}"#);
        assert!(result.is_err());
    }
}
