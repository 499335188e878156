use job_tracker_common::JobId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("応募記録が見つかりません: {0}")]
    NotFound(JobId),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("保存エラー: {0}")]
    Storage(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

impl From<job_tracker_common::Error> for TrackerError {
    fn from(e: job_tracker_common::Error) -> Self {
        use job_tracker_common::Error;
        match e {
            Error::NotFound(id) => TrackerError::NotFound(id),
            Error::InvalidStatus(_) | Error::InvalidDate(_) => {
                TrackerError::InvalidInput(e.to_string())
            }
            Error::Io(e) => TrackerError::Io(e),
            Error::Json(e) => TrackerError::JsonParse(e),
            Error::Storage(msg) => TrackerError::Storage(msg),
        }
    }
}

impl From<dialoguer::Error> for TrackerError {
    fn from(e: dialoguer::Error) -> Self {
        TrackerError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
