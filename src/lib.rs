//! 応募状況トラッカー（CLI）
//!
//! 記録ストアと集計は job-tracker-common、ここではファイル保存・設定・表示を担う

pub mod cli;
pub mod config;
pub mod error;
pub mod file_store;
pub mod logging;
pub mod report;

use config::Config;
use error::Result;
use file_store::FileBlobStore;
use job_tracker_common::RecordStore;

/// 設定に従ってストアを開く
pub fn open_store(config: &Config) -> Result<RecordStore<FileBlobStore>> {
    let dir = config.resolve_data_dir()?;
    tracing::debug!(dir = %dir.display(), key = %config.storage_key, "opening job store");
    Ok(RecordStore::open(FileBlobStore::new(dir), config.storage_key.clone()))
}
