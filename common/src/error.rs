//! エラー型定義

use crate::types::JobId;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Invalid status: {0} (expected Applied, Interview, Offer or Rejected)")]
    InvalidStatus(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
