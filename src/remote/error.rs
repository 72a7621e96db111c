/*
 * Responsibility
 * - remote 層が上位に伝える意味の定義
 */
use thiserror::Error;

/// Failures raised by record/blob write operations.
///
/// Kept independent from `CardError` so callers can decide how to fail
/// (the delete action treats blob `NotFound` as already-deleted, commit
/// treats every variant the same).
#[derive(Debug, Error)]
pub enum RemoteWriteError {
    #[error("remote backend error: {0}")]
    Backend(String),
    #[error("permission denied")]
    PermissionDenied,
    #[error("not found")]
    NotFound,
    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// Failures raised by blob URL resolution.
#[derive(Debug, Error)]
pub enum RemoteReadError {
    #[error("remote backend error: {0}")]
    Backend(String),
    #[error("not found")]
    NotFound,
}
