//! Blob store interface: object storage for post photos.
use async_trait::async_trait;

use super::error::{RemoteReadError, RemoteWriteError};

/// Reference to an uploaded blob, returned by `upload_blob`.
///
/// URL resolution is a separate, fallible read so backends that mint
/// download tokens (or presign) can do it lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHandle {
    pub path: String,
}

/// A minimal object-storage interface.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside).
#[async_trait]
pub trait BlobStore: Clone + Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Upload `data` at `path`, overwriting any existing blob.
    async fn upload_blob(&self, path: &str, data: &[u8]) -> Result<BlobHandle, RemoteWriteError>;

    // Resolve a handle to a publicly retrievable URL.
    async fn resolve_blob_url(&self, handle: &BlobHandle) -> Result<String, RemoteReadError>;

    // Delete the blob at `path`. Fails with `NotFound` if absent.
    async fn delete_blob(&self, path: &str) -> Result<(), RemoteWriteError>;
}
