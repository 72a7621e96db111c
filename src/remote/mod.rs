pub mod blob;
pub mod error;
pub mod memory;
pub mod record;
pub mod user;

pub use blob::{BlobHandle, BlobStore};
pub use error::{RemoteReadError, RemoteWriteError};
pub use memory::{Journal, MemoryBlobs, MemoryRecords, RemoteOp};
pub use record::{FieldMap, RecordStore, WriteResult};
pub use user::{CurrentUser, FixedUser};
