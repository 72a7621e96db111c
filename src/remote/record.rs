//! Record store interface: the document database seen by the card.
use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::RemoteWriteError;

/// Partial set of record fields, merged into the stored document on update.
pub type FieldMap = Map<String, Value>;

/// Result type for record writes.
pub type WriteResult<T> = Result<T, RemoteWriteError>;

/// A minimal document-database interface.
///
/// This is intentionally small:
/// - The card only merges fields into one record and deletes one record.
/// - Queries, listeners and record creation belong to the timeline, not here.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside).
#[async_trait]
pub trait RecordStore: Clone + Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Merge `fields` into the record `id` in `collection`.
    //
    // Fails with `NotFound` if the record does not exist; fields that are
    // absent from the map are left untouched.
    async fn update_record(&self, collection: &str, id: &str, fields: FieldMap)
    -> WriteResult<()>;

    // Delete the record `id` in `collection`.
    async fn delete_record(&self, collection: &str, id: &str) -> WriteResult<()>;
}
