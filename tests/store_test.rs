//! ファイル保存ストアのテスト
//!
//! FileBlobStore 上での登録・更新・削除と再読み込みを検証

use job_tracker::file_store::FileBlobStore;
use job_tracker_common::{
    BlobStore, FixedClock, JobId, JobInput, JobPatch, JobStatus, RecordStore, DEFAULT_STORAGE_KEY,
};
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

fn acme() -> JobInput {
    JobInput {
        company: "Acme".to_string(),
        position: "Eng".to_string(),
        status: JobStatus::Applied,
        date: "2024-03-01".to_string(),
        ..Default::default()
    }
}

/// 登録→更新→取得
#[test]
fn test_add_update_get() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), DEFAULT_STORAGE_KEY);

    let created = store.add(acme()).expect("登録失敗");
    let patch = JobPatch {
        status: Some(JobStatus::Interview),
        ..Default::default()
    };
    store.update(&created.id, &patch).expect("更新失敗");

    let fetched = store.get_by_id(&created.id).expect("レコードが見つからない");
    assert_eq!(fetched.status, JobStatus::Interview);
    assert_eq!(fetched.company, "Acme");
}

/// 再起動後も同じ内容が読み込まれる
#[test]
fn test_persisted_across_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");

    let (kept, removed) = {
        let mut store =
            RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), DEFAULT_STORAGE_KEY);
        let kept = store.add(acme()).unwrap();
        let removed = store
            .add(JobInput {
                company: "Globex".to_string(),
                ..acme()
            })
            .unwrap();
        store.remove(&removed.id).unwrap();
        (kept, removed)
    };

    let reopened = RecordStore::open(FileBlobStore::new(dir.path()), DEFAULT_STORAGE_KEY);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get_by_id(&kept.id), Some(&kept));
    assert!(reopened.get_by_id(&removed.id).is_none());
}

/// 保存ファイルが破損している場合は空として扱う
#[test]
fn test_corrupted_blob_loads_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("jobs.json"), "{ invalid json").unwrap();

    let store = RecordStore::open(FileBlobStore::new(dir.path()), DEFAULT_STORAGE_KEY);
    assert!(store.is_empty());
}

/// 破損データがあっても登録すれば正しい配列で上書きされる
#[test]
fn test_corrupted_blob_overwritten_on_add() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("jobs.json"), "not json at all").unwrap();

    let mut store = RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), DEFAULT_STORAGE_KEY);
    store.add(acme()).unwrap();

    let content = std::fs::read_to_string(dir.path().join("jobs.json")).unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(values.len(), 1);
}

/// ブラウザ版で保存されたデータ（小文字ステータス・文字列ID・追加フィールド）
#[test]
fn test_browser_blob_compatibility() {
    let dir = tempdir().expect("Failed to create temp dir");
    let blob = r#"[
        {"id": "1705000000000", "company": "Tech Corp", "position": "Frontend Developer",
         "status": "interview", "date": "2024-01-11", "salary": "120k"},
        {"id": 1706000000000, "title": "React Developer", "company": "Innovation Labs",
         "platform": "LinkedIn", "status": "Applied", "followUpDate": "2024-03-18",
         "notes": "", "createdAt": "2024-01-23T08:53:20.000Z", "updatedAt": "2024-01-23T08:53:20.000Z"}
    ]"#;
    std::fs::write(dir.path().join("jobs.json"), blob).unwrap();

    let mut store = RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), DEFAULT_STORAGE_KEY);
    assert_eq!(store.len(), 2);

    let first = store.get_by_id(&JobId::Text("1705000000000".to_string())).unwrap();
    assert_eq!(first.status, JobStatus::Interview);

    let second = store.get_by_id(&JobId::Number(1706000000000)).unwrap();
    assert_eq!(second.position, "React Developer");
    assert_eq!(second.platform.as_deref(), Some("LinkedIn"));

    // 新しいIDは既存の最大値より大きい
    let created = store.add(acme()).unwrap();
    assert_eq!(created.id, JobId::Number(1709294400000));

    // 未知フィールドとIDの形式は書き戻される
    let backend = store.into_backend();
    let content = backend.read_blob(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let values: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(values[0]["salary"], "120k");
    assert_eq!(values[0]["id"], "1705000000000");
    assert_eq!(values[0]["status"], "Interview");
}

/// 存在しないIDの更新はNotFound、内容は変わらない
#[test]
fn test_update_missing_id_leaves_file_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), DEFAULT_STORAGE_KEY);
    store.add(acme()).unwrap();
    let before = std::fs::read_to_string(dir.path().join("jobs.json")).unwrap();

    let patch = JobPatch {
        company: Some("Other".to_string()),
        ..Default::default()
    };
    let result = store.update(&JobId::Text("missing".to_string()), &patch);
    assert!(matches!(result, Err(job_tracker_common::Error::NotFound(_))));

    let after = std::fs::read_to_string(dir.path().join("jobs.json")).unwrap();
    assert_eq!(before, after);
}

/// 保存キーを変えると別ファイルになる
#[test]
fn test_custom_storage_key() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::with_clock(FileBlobStore::new(dir.path()), clock(), "archive");
    store.add(acme()).unwrap();

    assert!(dir.path().join("archive.json").exists());
    assert!(!dir.path().join("jobs.json").exists());
}
