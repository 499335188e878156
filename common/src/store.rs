//! 応募記録ストア
//!
//! メモリ上のレコード一覧を唯一の正とし、変更のたびに一覧全体を
//! BlobStore の固定キーへ書き出す。起動時は同じキーから読み込む。

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::types::{JobId, JobInput, JobPatch, JobRecord};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// 保存キーのデフォルト値（ブラウザ版の localStorage キーと同じ）
pub const DEFAULT_STORAGE_KEY: &str = "jobs";

/// キー・値形式の永続化ポート
///
/// 書き込みは上書きのみ。原子性は実装側（localStorage・ファイルのrename等）に任せる。
pub trait BlobStore {
    /// キーが存在しなければ `Ok(None)`
    fn read_blob(&self, key: &str) -> Result<Option<String>>;

    fn write_blob(&mut self, key: &str, value: &str) -> Result<()>;
}

/// メモリ上の BlobStore（テスト・一時利用向け）
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存データを持った状態で作成
    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.blobs.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write_blob(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 応募記録ストア
pub struct RecordStore<B: BlobStore, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    key: String,
    records: Vec<JobRecord>,
}

impl<B: BlobStore> RecordStore<B, SystemClock> {
    /// システム時計でストアを開き、保存済みデータを読み込む
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        Self::with_clock(backend, SystemClock, key)
    }
}

impl<B: BlobStore, C: Clock> RecordStore<B, C> {
    pub fn with_clock(backend: B, clock: C, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            clock,
            key: key.into(),
            records: Vec::new(),
        };
        store.load();
        store
    }

    /// 保存済みデータを読み直す
    ///
    /// 読み込み失敗・不正なデータはエラーにせず空の一覧として扱う。
    pub fn load(&mut self) -> &[JobRecord] {
        self.records = match self.backend.read_blob(&self.key) {
            Ok(Some(blob)) => decode_records(&blob),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read job blob, starting empty");
                Vec::new()
            }
        };
        debug!(key = %self.key, count = self.records.len(), "loaded jobs");
        &self.records
    }

    /// 挿入順のレコード一覧
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// 数値IDと数字のみの文字列IDは同一として検索する
    pub fn get_by_id(&self, id: &JobId) -> Option<&JobRecord> {
        self.records.iter().find(|r| r.id.matches(id))
    }

    /// 新規登録。IDとタイムスタンプを付与して末尾に追加する
    pub fn add(&mut self, input: JobInput) -> Result<JobRecord> {
        let id = self.next_id()?;
        let now = self.clock.now_utc().to_rfc3339();

        let mut record = JobRecord::from_input(id, input);
        record.created_at = Some(now.clone());
        record.updated_at = Some(now);

        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        debug!(id = %record.id, company = %record.company, "added job");
        Ok(record)
    }

    /// 部分更新。存在しないIDは `Error::NotFound`
    pub fn update(&mut self, id: &JobId, patch: &JobPatch) -> Result<JobRecord> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let previous = self.records[index].clone();
        let updated_at = self.clock.now_utc().to_rfc3339();
        {
            let record = &mut self.records[index];
            patch.apply_to(record);
            record.updated_at = Some(updated_at);
        }

        if let Err(e) = self.persist() {
            self.records[index] = previous;
            return Err(e);
        }

        debug!(id = %id, "updated job");
        Ok(self.records[index].clone())
    }

    /// 削除。実際に削除したかどうかを返す（該当なしでも書き出しは行う）
    ///
    /// 確認ダイアログは呼び出し側の責務。
    pub fn remove(&mut self, id: &JobId) -> Result<bool> {
        let removed = self.index_of(id).map(|i| (i, self.records.remove(i)));

        if let Err(e) = self.persist() {
            if let Some((i, record)) = removed {
                self.records.insert(i, record);
            }
            return Err(e);
        }

        debug!(id = %id, removed = removed.is_some(), "remove job");
        Ok(removed.is_some())
    }

    fn index_of(&self, id: &JobId) -> Option<usize> {
        self.records.iter().position(|r| r.id.matches(id))
    }

    /// 一覧全体をシリアライズして上書き
    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.records)?;
        self.backend.write_blob(&self.key, &blob)
    }

    /// 現在時刻(ms)ベースのID。既存の最大数値IDより大きくする
    ///
    /// 最大値が u64::MAX で次が作れない場合は、現在時刻以降（なければ0以降）の空き番号を使う。
    fn next_id(&self) -> Result<JobId> {
        let millis = u64::try_from(self.clock.now_utc().timestamp_millis()).unwrap_or(0);
        let used: HashSet<u64> = self.records.iter().filter_map(|r| r.id.numeric_value()).collect();

        let candidate = match used.iter().max() {
            Some(&max) if max >= millis => max.checked_add(1),
            _ => Some(millis),
        };
        if let Some(n) = candidate {
            return Ok(JobId::Number(n));
        }

        warn!("job id space exhausted above the current maximum, reusing a free id");
        (millis..=u64::MAX)
            .chain(0..millis)
            .find(|n| !used.contains(n))
            .map(JobId::Number)
            .ok_or_else(|| Error::Storage("空きIDがありません".to_string()))
    }
}

/// 保存データをレコード一覧にデコード
///
/// - 配列でなければ空
/// - 要素単位でデコードし、不正な要素・重複IDはスキップ
pub fn decode_records(blob: &str) -> Vec<JobRecord> {
    let values: Vec<Value> = match serde_json::from_str(blob) {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "job blob is malformed, treating as empty");
            return Vec::new();
        }
    };

    // 1 と "1" も重複として扱う
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<JobRecord>(value) {
            Ok(record) => {
                if seen.insert(record.id.to_string()) {
                    records.push(record);
                } else {
                    warn!(index, id = %record.id, "duplicate job id, skipping");
                }
            }
            Err(e) => warn!(index, error = %e, "skipping undecodable job record"),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::JobStatus;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    fn input(company: &str, status: JobStatus, date: &str) -> JobInput {
        JobInput {
            company: company.to_string(),
            position: "Eng".to_string(),
            status,
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn stored_array<C: Clock>(store: &RecordStore<MemoryBlobStore, C>) -> Vec<Value> {
        let blob = store.backend().get(DEFAULT_STORAGE_KEY).expect("blob not written");
        serde_json::from_str(blob).unwrap()
    }

    /// 書き込みが必ず失敗するBlobStore
    struct BrokenBlobStore;

    impl BlobStore for BrokenBlobStore {
        fn read_blob(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write_blob(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_open_empty() {
        let store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
        assert_eq!(store.key(), "jobs");
    }

    #[test]
    fn test_add_assigns_unique_ids_and_persists() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);

        // 同一時刻でもIDは重複しない
        let a = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        let b = store.add(input("Globex", JobStatus::Applied, "2024-03-02")).unwrap();
        let c = store.add(input("Initech", JobStatus::Offer, "2024-03-03")).unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.len(), 3);
        assert_eq!(stored_array(&store).len(), 3);

        // 挿入順を保持
        let companies: Vec<_> = store.records().iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, ["Acme", "Globex", "Initech"]);
    }

    #[test]
    fn test_add_sets_timestamps() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        let record = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();

        assert_eq!(record.id, JobId::Number(1709283600000));
        assert_eq!(record.created_at.as_deref(), Some("2024-03-01T09:00:00+00:00"));
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_ids_stay_above_existing_ids() {
        let blob = json!([
            {"id": 9999999999999u64, "company": "Future", "position": "Eng", "status": "Applied", "date": "2024-01-01"}
        ])
        .to_string();
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, &blob);
        let mut store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);

        let record = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        assert_eq!(record.id, JobId::Number(10000000000000));
    }

    #[test]
    fn test_next_id_at_u64_max() {
        let blob = json!([
            {"id": u64::MAX, "company": "Max", "position": "Eng", "status": "Applied", "date": "2024-01-01"},
            {"id": "1709283600000", "company": "Now", "position": "Eng", "status": "Applied", "date": "2024-01-01"}
        ])
        .to_string();
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, &blob);
        let mut store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);

        // 現在時刻のIDは使用済みなので次の空き番号
        let record = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        assert_eq!(record.id, JobId::Number(1709283600001));

        let again = store.add(input("Globex", JobStatus::Applied, "2024-03-01")).unwrap();
        assert_eq!(again.id, JobId::Number(1709283600002));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_next_id_at_u64_max_as_text() {
        let blob = json!([
            {"id": u64::MAX.to_string(), "company": "Max", "position": "Eng", "status": "Applied", "date": "2024-01-01"}
        ])
        .to_string();
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, &blob);
        let mut store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);

        let record = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        assert_eq!(record.id, JobId::Number(1709283600000));
    }

    #[test]
    fn test_lookup_text_id_with_number() {
        let blob = json!([
            {"id": "1705000000000", "company": "Tech Corp", "position": "Eng", "status": "applied", "date": "2024-01-11"}
        ])
        .to_string();
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, &blob);
        let mut store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);
        let id = JobId::Number(1705000000000);

        assert_eq!(store.get_by_id(&id).map(|r| r.company.as_str()), Some("Tech Corp"));

        let patch = JobPatch {
            status: Some(JobStatus::Offer),
            ..Default::default()
        };
        let updated = store.update(&id, &patch).unwrap();
        assert_eq!(updated.status, JobStatus::Offer);
        // 書き戻しは元の文字列IDのまま
        assert_eq!(stored_array(&store)[0]["id"], json!("1705000000000"));

        assert!(store.remove(&id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_then_get() {
        let clock = clock();
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), &clock, DEFAULT_STORAGE_KEY);
        let created = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();

        clock.advance(Duration::hours(1));
        let patch = JobPatch {
            status: Some(JobStatus::Interview),
            ..Default::default()
        };
        let updated = store.update(&created.id, &patch).unwrap();

        let fetched = store.get_by_id(&created.id).unwrap();
        assert_eq!(fetched.status, JobStatus::Interview);
        assert_eq!(fetched.company, "Acme");
        assert_eq!(fetched, &updated);
        assert_eq!(fetched.created_at, created.created_at);
        assert_eq!(fetched.updated_at.as_deref(), Some("2024-03-01T10:00:00+00:00"));

        // 永続化済み
        assert_eq!(stored_array(&store)[0]["status"], json!("Interview"));
    }

    #[test]
    fn test_update_keeps_other_fields() {
        let blob = json!([
            {"id": "x1", "company": "Acme", "position": "Eng", "status": "applied",
             "date": "2024-01-10", "notes": "referral", "custom": [1, 2, 3]}
        ])
        .to_string();
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, &blob);
        let mut store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);
        let id = JobId::Text("x1".to_string());
        let before = store.get_by_id(&id).unwrap().clone();

        let patch = JobPatch {
            position: Some("Senior Eng".to_string()),
            ..Default::default()
        };
        let after = store.update(&id, &patch).unwrap();

        assert_eq!(after.position, "Senior Eng");
        assert_eq!(after.company, before.company);
        assert_eq!(after.status, before.status);
        assert_eq!(after.date, before.date);
        assert_eq!(after.notes, before.notes);
        assert_eq!(after.extra, before.extra);

        let stored = stored_array(&store);
        assert_eq!(stored[0]["custom"], json!([1, 2, 3]));
        assert_eq!(stored[0]["id"], json!("x1"));
    }

    #[test]
    fn test_update_missing_id() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        let snapshot = store.records().to_vec();

        let patch = JobPatch {
            status: Some(JobStatus::Offer),
            ..Default::default()
        };
        let result = store.update(&JobId::Number(1), &patch);

        assert!(matches!(result, Err(Error::NotFound(JobId::Number(1)))));
        assert_eq!(store.records(), snapshot.as_slice());
    }

    #[test]
    fn test_remove() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        let a = store.add(input("Acme", JobStatus::Applied, "2024-03-01")).unwrap();
        let b = store.add(input("Globex", JobStatus::Rejected, "2024-03-02")).unwrap();

        assert!(store.remove(&a.id).unwrap());
        assert!(store.get_by_id(&a.id).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(stored_array(&store).len(), 1);

        // 2回目は削除対象なし
        assert!(!store.remove(&a.id).unwrap());
        assert!(store.get_by_id(&b.id).is_some());
    }

    #[test]
    fn test_remove_missing_still_persists() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        assert!(!store.remove(&JobId::Number(7)).unwrap());
        assert_eq!(store.backend().get(DEFAULT_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_size_tracks_adds_and_removes() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        let mut ids = Vec::new();
        for i in 0..10 {
            let record = store
                .add(input(&format!("Company{}", i), JobStatus::Applied, "2024-03-01"))
                .unwrap();
            ids.push(record.id);
        }
        for id in ids.iter().step_by(3) {
            store.remove(id).unwrap();
        }

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 10);
        assert_eq!(store.len(), 10 - 4);
    }

    #[test]
    fn test_reload_from_backend() {
        let mut store = RecordStore::with_clock(MemoryBlobStore::new(), clock(), DEFAULT_STORAGE_KEY);
        let created = store.add(input("Acme", JobStatus::Offer, "2024-03-01")).unwrap();

        let reopened = RecordStore::with_clock(store.into_backend(), clock(), DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get_by_id(&created.id), Some(&created));
    }

    #[test]
    fn test_load_invalid_json() {
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, "{not json");
        let store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_non_array() {
        let backend = MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, r#"{"jobs": []}"#);
        let store = RecordStore::with_clock(backend, clock(), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_decode_skips_bad_and_duplicate_records() {
        let blob = json!([
            {"id": 1, "company": "A", "position": "Eng", "status": "Applied", "date": "2024-01-01"},
            {"id": 2, "company": "B", "position": "Eng", "status": "Ghosted", "date": "2024-01-01"},
            {"company": "C", "status": "Offer"},
            {"id": 1, "company": "D", "position": "Eng", "status": "Offer", "date": "2024-01-01"},
            {"id": "1", "company": "F", "position": "Eng", "status": "Offer", "date": "2024-01-01"},
            {"id": 3, "company": "E", "position": "Eng", "status": "rejected", "date": "bad"}
        ])
        .to_string();

        let records = decode_records(&blob);
        let companies: Vec<_> = records.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, ["A", "E"]);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = RecordStore::with_clock(BrokenBlobStore, clock(), DEFAULT_STORAGE_KEY);
        let result = store.add(input("Acme", JobStatus::Applied, "2024-03-01"));

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.is_empty());
    }
}
