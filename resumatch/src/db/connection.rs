use libsql::{Builder, Connection};
use std::sync::Arc;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

pub struct Database {
    db: Arc<libsql::Database>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let db = if config.url.starts_with("libsql://") || config.url.starts_with("https://") {
            if let Some(ref local_path) = config.local_path {
                Builder::new_remote_replica(
                    local_path,
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            } else {
                Builder::new_remote(
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            }
        } else if config.url == ":memory:" {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let database = Self { db: Arc::new(db) };
        database.configure().await?;
        database.init_schema().await?;

        Ok(database)
    }

    /// Bootstrap helper that keeps retrying while the database container
    /// comes up. One-time startup concern, never used per request.
    pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<Self> {
        let mut last_err = None;
        for attempt in 1..=config.connect_attempts {
            match Self::new(config).await {
                Ok(db) => return Ok(db),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max = config.connect_attempts,
                        error = %e,
                        "Database not ready, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(config.connect_retry_secs)).await;
                }
            }
        }
        Err(last_err.expect("at least one connection attempt"))
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure(&self) -> Result<()> {
        let conn = self.connect()?;
        for pragma in ["PRAGMA busy_timeout = 5000", "PRAGMA journal_mode = WAL"] {
            if let Err(error) = conn.execute_batch(pragma).await {
                tracing::warn!(pragma, %error, "Failed to apply SQLite pragma");
            }
        }
        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::init_schema(&conn).await?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}
