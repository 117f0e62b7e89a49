use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use futures::StreamExt;
use std::path::Path;
use tokio_util::io::ReaderStream;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

use super::{ObjectDownload, ObjectStore};

/// S3-compatible object store client.
///
/// Uses path-style addressing so it works against MinIO and other
/// self-hosted S3 implementations out of the box.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "resumatch-static",
        );

        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, local_path: &Path, content_type: &str) -> Result<String> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| AppError::Storage(format!("failed to read staged file: {e}")))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("failed to upload object: {e}")))?;

        Ok(format!("/{}/{}", self.bucket, key))
    }

    async fn get(&self, key: &str) -> Result<ObjectDownload> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    AppError::NotFound(format!("object '{key}' not found"))
                } else {
                    AppError::Storage(format!("failed to fetch object: {service_err}"))
                }
            })?;

        let content_type = output.content_type().map(str::to_string);
        let body = ReaderStream::new(output.body.into_async_read()).boxed();

        Ok(ObjectDownload { content_type, body })
    }
}
