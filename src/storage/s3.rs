//! S3-backed blob store.
//!
//! The async SDK is confined to this module: the client owns a dedicated
//! current-thread runtime and every trait method blocks on it, so callers see
//! the same synchronous surface as the directory-backed store.

use crate::core::errors::{EvalError, EvalResult};
use crate::storage::BlobStore;
use std::path::Path;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Blob store over an S3 bucket (or an S3-compatible endpoint).
#[derive(Debug)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    runtime: tokio::runtime::Runtime,
}

impl S3BlobStore {
    /// Connects to the given bucket.
    ///
    /// Credentials are resolved from the default provider chain. `region`
    /// overrides the region from the environment; `endpoint_url` switches the
    /// client to path-style addressing against an S3-compatible store.
    pub fn connect(
        bucket: impl Into<String>,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> EvalResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EvalError::config(format!("failed to start storage runtime: {e}")))?;

        let client = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(aws_config::Region::new(region));
            }
            let shared = loader.load().await;

            let mut builder = aws_sdk_s3::config::Builder::from(&shared);
            if let Some(url) = endpoint_url {
                builder = builder.endpoint_url(url).force_path_style(true);
            }
            aws_sdk_s3::Client::from_conf(builder.build())
        });

        Ok(Self {
            client,
            bucket: bucket.into(),
            runtime,
        })
    }

    /// The bucket this store addresses.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl BlobStore for S3BlobStore {
    fn get_object(&self, key: &str) -> EvalResult<Vec<u8>> {
        let bytes = self
            .runtime
            .block_on(async {
                let output = self
                    .client
                    .get_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| Box::new(e) as BoxedError)?;
                let data = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| Box::new(e) as BoxedError)?;
                Ok::<_, BoxedError>(data.into_bytes())
            })
            .map_err(|source| EvalError::Storage {
                operation: "get",
                key: key.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    fn download_to(&self, key: &str, path: &Path) -> EvalResult<()> {
        let bytes = self.get_object(key)?;
        std::fs::write(path, bytes).map_err(|e| EvalError::io(path, e))
    }

    fn put_object(&self, key: &str, path: &Path) -> EvalResult<()> {
        self.runtime
            .block_on(async {
                let body = aws_sdk_s3::primitives::ByteStream::from_path(path)
                    .await
                    .map_err(|e| Box::new(e) as BoxedError)?;
                self.client
                    .put_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| Box::new(e) as BoxedError)?;
                Ok::<_, BoxedError>(())
            })
            .map_err(|source| EvalError::Storage {
                operation: "upload",
                key: key.to_string(),
                source,
            })
    }
}
