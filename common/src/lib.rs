//! Job Tracker Common Library
//!
//! CLIとWeb(WASM)で共有される応募記録ストアと集計処理

pub mod types;
pub mod error;
pub mod clock;
pub mod store;
pub mod analytics;
pub mod query;

pub use types::{JobId, JobInput, JobPatch, JobRecord, JobStatus, parse_job_date, validate_job_date};
pub use error::{Error, Result};
pub use clock::{Clock, FixedClock, SystemClock};
pub use store::{BlobStore, MemoryBlobStore, RecordStore, DEFAULT_STORAGE_KEY, decode_records};
pub use analytics::{
    MonthBucket, StatusCounts, Summary, DEFAULT_MONTHS_BACK, MAX_MONTHS_BACK, active_count, interview_rate,
    monthly_histogram, status_counts, success_rate, summarize,
};
pub use query::{JobFilter, SortOrder, platforms, sort_by_date};
