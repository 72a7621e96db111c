/*
 * Responsibility
 * - カードに渡す共有コンテキスト (CardDeps)
 *   - ex: records: RecordStore, blobs: BlobStore, user: CurrentUser, config
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::remote::{BlobStore, CurrentUser, RecordStore};

#[derive(Clone)]
pub struct CardDeps<R, B, U>
where
    R: RecordStore,
    B: BlobStore,
    U: CurrentUser,
{
    pub records: R,
    pub blobs: B,
    pub user: U,
    pub config: Arc<Config>,
}

impl<R, B, U> CardDeps<R, B, U>
where
    R: RecordStore,
    B: BlobStore,
    U: CurrentUser,
{
    pub fn new(records: R, blobs: B, user: U, config: Config) -> Self {
        Self {
            records,
            blobs,
            user,
            config: Arc::new(config),
        }
    }
}
