use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub analyzer: AnalyzerConfig,
    pub auth: AuthConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    /// Bootstrap retry attempts while waiting for the database container.
    pub connect_attempts: u32,
    pub connect_retry_secs: u64,
}

/// S3-compatible object storage (MinIO, R2, AWS S3).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token-introspection endpoint of the identity provider.
    pub tokeninfo_url: String,
    /// When set, tokens whose `aud` claim does not match are rejected.
    /// Unset disables the check.
    pub expected_audience: Option<String>,
    pub session_ttl_secs: u64,
    pub session_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Directory for staging uploads before extraction.
    pub staging_dir: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("RESUMATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("RESUMATCH_PORT", 8080),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:resumatch.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
                connect_attempts: parse_env_or("DATABASE_CONNECT_ATTEMPTS", 15),
                connect_retry_secs: parse_env_or("DATABASE_CONNECT_RETRY_SECS", 2),
            },
            storage: StorageConfig {
                endpoint: env::var("STORAGE_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:9000".to_string()),
                access_key: env::var("STORAGE_ACCESS_KEY")
                    .unwrap_or_else(|_| "minioadmin".to_string()),
                secret_key: env::var("STORAGE_SECRET_KEY")
                    .unwrap_or_else(|_| "minioadmin".to_string()),
                bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "resumes".to_string()),
                region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            },
            analyzer: AnalyzerConfig {
                base_url: env::var("AI_SERVICE_URL")
                    .unwrap_or_else(|_| "http://ai-service:5000".to_string()),
            },
            auth: AuthConfig {
                tokeninfo_url: env::var("AUTH_TOKENINFO_URL")
                    .unwrap_or_else(|_| "https://oauth2.googleapis.com/tokeninfo".to_string()),
                expected_audience: env::var("AUTH_EXPECTED_AUDIENCE").ok(),
                session_ttl_secs: parse_env_or("AUTH_SESSION_TTL_SECS", 3600),
                session_capacity: parse_env_or("AUTH_SESSION_CAPACITY", 10_000),
            },
            ingest: IngestConfig {
                staging_dir: env::var("UPLOAD_STAGING_DIR")
                    .unwrap_or_else(|_| "./uploads".to_string()),
                max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
