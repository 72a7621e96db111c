/*
 * Responsibility
 * - コンポーネント共通の CardError 定義
 * - remote 層 / バリデーションのエラーを統一的に変換
 */
use thiserror::Error;

use crate::remote::{RemoteReadError, RemoteWriteError};

/// Rejected file selection.
///
/// Surfaced to the user as a blocking alert; never sent anywhere remote.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected exactly one file, got {count}")]
    NotExactlyOneFile { count: usize },
    #[error("file is {size} bytes, limit is {max}")]
    FileTooLarge { size: usize, max: usize },
}

/// Boundary error for card operations.
///
/// Public handlers catch this at the top and route it: remote failures to
/// the diagnostic log, validation failures to the user-facing alert queue.
#[derive(Debug, Error)]
pub enum CardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("remote write failed: {0}")]
    RemoteWrite(#[from] RemoteWriteError),
    #[error("remote read failed: {0}")]
    RemoteRead(#[from] RemoteReadError),
}
