//! localStorage 版 BlobStore

use gloo::storage::{LocalStorage, Storage};
use job_tracker_common::{BlobStore, Error, Result};
use wasm_bindgen::JsValue;

/// `window.localStorage` にそのまま読み書きする
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBlobStore;

impl BlobStore for LocalBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn write_blob(&mut self, key: &str, value: &str) -> Result<()> {
        // 容量超過(QuotaExceededError)はここで返る
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }
}

fn storage_error(e: JsValue) -> Error {
    Error::Storage(format!("localStorage: {:?}", e))
}
