/*
 * Responsibility
 * - RecordStore / BlobStore のインメモリ実装 (ネットワーク不要のデフォルトバックエンド)
 * - 共有ジャーナルに全操作を記録 (テストでの呼び出し回数・順序の検証用)
 */
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::blob::{BlobHandle, BlobStore};
use super::error::{RemoteReadError, RemoteWriteError};
use super::record::{FieldMap, RecordStore, WriteResult};

/// One remote operation as observed by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOp {
    UpdateRecord {
        collection: String,
        id: String,
        keys: Vec<String>,
    },
    DeleteRecord {
        collection: String,
        id: String,
    },
    UploadBlob {
        path: String,
        bytes: usize,
    },
    ResolveBlobUrl {
        path: String,
    },
    DeleteBlob {
        path: String,
    },
}

/// Shared, ordered log of remote operations.
///
/// Hand the same journal to `MemoryRecords` and `MemoryBlobs` so ordering
/// across the two stores is observable (upload before record write, etc.).
#[derive(Debug, Clone, Default)]
pub struct Journal {
    ops: Arc<Mutex<Vec<RemoteOp>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    async fn push(&self, op: RemoteOp) {
        self.ops.lock().await.push(op);
    }

    pub async fn ops(&self) -> Vec<RemoteOp> {
        self.ops.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.ops.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ops.lock().await.is_empty()
    }
}

/// In-memory document database keyed by (collection, id).
#[derive(Debug, Clone, Default)]
pub struct MemoryRecords {
    journal: Journal,
    records: Arc<Mutex<HashMap<(String, String), FieldMap>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryRecords {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    /// Insert a record wholesale, bypassing the journal. Seeding only.
    pub async fn seed(&self, collection: &str, id: &str, fields: FieldMap) {
        self.records
            .lock()
            .await
            .insert((collection.to_string(), id.to_string()), fields);
    }

    /// Current contents of a record, if it exists.
    pub async fn record(&self, collection: &str, id: &str) -> Option<FieldMap> {
        self.records
            .lock()
            .await
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    /// Make every subsequent write fail. Failure-path testing only.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> WriteResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteWriteError::Backend("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecords {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        fields: FieldMap,
    ) -> WriteResult<()> {
        self.journal
            .push(RemoteOp::UpdateRecord {
                collection: collection.to_string(),
                id: id.to_string(),
                keys: fields.keys().cloned().collect(),
            })
            .await;
        self.check_fail()?;

        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&(collection.to_string(), id.to_string()))
            .ok_or(RemoteWriteError::NotFound)?;
        for (key, value) in fields {
            record.insert(key, value);
        }
        Ok(())
    }

    async fn delete_record(&self, collection: &str, id: &str) -> WriteResult<()> {
        self.journal
            .push(RemoteOp::DeleteRecord {
                collection: collection.to_string(),
                id: id.to_string(),
            })
            .await;
        self.check_fail()?;

        self.records
            .lock()
            .await
            .remove(&(collection.to_string(), id.to_string()))
            .map(|_| ())
            .ok_or(RemoteWriteError::NotFound)
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Vec<u8>,
    // Minted per upload, the way hosted stores tack a download token onto
    // resolved URLs. A re-upload rotates it.
    token: Uuid,
}

/// In-memory object storage keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobs {
    journal: Journal,
    blobs: Arc<Mutex<HashMap<String, StoredBlob>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBlobs {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    /// Insert a blob wholesale, bypassing the journal. Seeding only.
    pub async fn seed(&self, path: &str, data: Vec<u8>) {
        self.blobs.lock().await.insert(
            path.to_string(),
            StoredBlob {
                data,
                token: Uuid::new_v4(),
            },
        );
    }

    /// Raw bytes stored at `path`, if any.
    pub async fn blob(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(path).map(|b| b.data.clone())
    }

    /// Make every subsequent upload/delete fail. Failure-path testing only.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_fail(&self) -> Result<(), RemoteWriteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RemoteWriteError::QuotaExceeded);
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobs {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn upload_blob(&self, path: &str, data: &[u8]) -> Result<BlobHandle, RemoteWriteError> {
        self.journal
            .push(RemoteOp::UploadBlob {
                path: path.to_string(),
                bytes: data.len(),
            })
            .await;
        self.check_fail()?;

        self.blobs.lock().await.insert(
            path.to_string(),
            StoredBlob {
                data: data.to_vec(),
                token: Uuid::new_v4(),
            },
        );
        Ok(BlobHandle {
            path: path.to_string(),
        })
    }

    async fn resolve_blob_url(&self, handle: &BlobHandle) -> Result<String, RemoteReadError> {
        self.journal
            .push(RemoteOp::ResolveBlobUrl {
                path: handle.path.clone(),
            })
            .await;

        let blobs = self.blobs.lock().await;
        let stored = blobs.get(&handle.path).ok_or(RemoteReadError::NotFound)?;
        Ok(format!(
            "https://storage.local/{}?token={}",
            handle.path, stored.token
        ))
    }

    async fn delete_blob(&self, path: &str) -> Result<(), RemoteWriteError> {
        self.journal
            .push(RemoteOp::DeleteBlob {
                path: path.to_string(),
            })
            .await;
        self.check_fail()?;

        self.blobs
            .lock()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or(RemoteWriteError::NotFound)
    }
}
