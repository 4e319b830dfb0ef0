//! S3 transcript store
//!
//! Conversion transcripts are written once as plaintext objects and never
//! read back by the service.

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3SdkClient};
use aws_smithy_types::error::display::DisplayErrorContext;

const TRANSCRIPT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Write-only store for conversion transcripts.
///
/// Implemented by [`S3TranscriptStore`] in production and by substitutes in tests.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Store `body` under `key`
    async fn put_transcript(&self, key: &str, body: String) -> Result<(), StorageError>;

    /// Whether the store is reachable
    async fn health_check(&self) -> bool {
        true
    }
}

/// Transcript store backed by one S3 bucket
#[derive(Clone)]
pub struct S3TranscriptStore {
    client: S3SdkClient,
    /// Bucket name (`S3_BUCKET_NAME`), unset until configured
    bucket: Option<String>,
}

impl S3TranscriptStore {
    pub fn new(client: S3SdkClient, bucket: Option<String>) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }
}

#[async_trait]
impl TranscriptStore for S3TranscriptStore {
    async fn put_transcript(&self, key: &str, body: String) -> Result<(), StorageError> {
        let bucket = self.bucket().ok_or(StorageError::BucketNotConfigured)?;
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(TRANSCRIPT_CONTENT_TYPE)
            .body(ByteStream::from(body.into_bytes()))
            .send()
            .await
            .map_err(|e| StorageError::S3(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(bucket = %bucket, key = %key, bytes = size, "Stored transcript");

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let Some(bucket) = self.bucket() else {
            tracing::debug!("S3 health check skipped: no bucket configured");
            return false;
        };

        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => {
                tracing::debug!(bucket = %bucket, "S3 health check passed");
                true
            }
            Err(e) => {
                tracing::warn!(bucket = %bucket, error = %DisplayErrorContext(&e), "S3 health check failed");
                false
            }
        }
    }
}

/// Errors that can occur while storing transcripts
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("S3 error: {0}")]
    S3(String),

    #[error("Transcript bucket is not configured (set S3_BUCKET_NAME)")]
    BucketNotConfigured,
}
