//! Durable object storage for original resume files.
//!
//! The pipeline and retrieval handlers only ever talk to the [`ObjectStore`]
//! trait; production wires in the S3-compatible client from [`s3`], which
//! works against MinIO, Cloudflare R2, or AWS S3.

mod s3;

pub use s3::S3ObjectStore;

use async_trait::async_trait;
use axum::body::Bytes;
use futures::stream::BoxStream;
use std::path::Path;

use crate::error::Result;

/// A blob streamed back from the object store.
pub struct ObjectDownload {
    /// Content type recorded at upload time, when the store reports one.
    pub content_type: Option<String>,
    pub body: BoxStream<'static, std::io::Result<Bytes>>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file under `key`, returning a logical reference.
    async fn put(&self, key: &str, local_path: &Path, content_type: &str) -> Result<String>;

    /// Stream the blob stored under `key`. `NotFound` when the store reports
    /// an absence.
    async fn get(&self, key: &str) -> Result<ObjectDownload>;
}
