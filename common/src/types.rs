//! 応募記録の型定義
//!
//! 永続化されるのは JobRecord のみ。
//! - JobInput: 新規登録時の入力（id・タイムスタンプは Store が付与）
//! - JobPatch: 部分更新（指定されたフィールドのみ上書き）

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// 応募ステータス
///
/// 読み込み時は `Applied` / `applied` の両方を受け付け、書き出しは常に先頭大文字。
/// 遷移の制約はなく、どのステータスからどのステータスへも変更できる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    #[serde(alias = "applied")]
    Applied,
    #[serde(alias = "interview")]
    Interview,
    #[serde(alias = "offer")]
    Offer,
    #[serde(alias = "rejected")]
    Rejected,
}

impl JobStatus {
    /// 表示・集計順
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }

    /// 選考中（Applied / Interview）かどうか
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Applied | JobStatus::Interview)
    }

    /// 面接まで進んだか（Interview / Offer）
    pub fn reached_interview(&self) -> bool {
        matches!(self, JobStatus::Interview | JobStatus::Offer)
    }
}

impl FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(JobStatus::Applied),
            "interview" => Ok(JobStatus::Interview),
            "offer" => Ok(JobStatus::Offer),
            "rejected" => Ok(JobStatus::Rejected),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 応募記録のID
///
/// 保存データには数値IDと文字列IDが混在しうるため、読み込んだ形のまま書き戻す。
/// 新規IDは常に数値。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(u64),
    Text(String),
}

impl JobId {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            JobId::Number(n) => Some(*n),
            JobId::Text(_) => None,
        }
    }

    /// 同じレコードを指すか
    ///
    /// `1705000000000` と `"1705000000000"` は同一とみなす（ブラウザ版は文字列IDで保存する）。
    pub fn matches(&self, other: &JobId) -> bool {
        match (self, other) {
            (JobId::Number(a), JobId::Number(b)) => a == b,
            (JobId::Text(a), JobId::Text(b)) => a == b,
            (JobId::Number(n), JobId::Text(s)) | (JobId::Text(s), JobId::Number(n)) => {
                *s == n.to_string()
            }
        }
    }

    /// 数値として扱えるID（数字のみの文字列IDを含む）
    pub fn numeric_value(&self) -> Option<u64> {
        match self {
            JobId::Number(n) => Some(*n),
            JobId::Text(s) => s.parse::<u64>().ok().filter(|n| *s == n.to_string()),
        }
    }
}

impl From<u64> for JobId {
    fn from(n: u64) -> Self {
        JobId::Number(n)
    }
}

impl FromStr for JobId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => JobId::Number(n),
            Err(_) => JobId::Text(s.to_string()),
        })
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{}", n),
            JobId::Text(s) => f.write_str(s),
        }
    }
}

/// 応募記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,

    #[serde(default)]
    pub company: String,

    #[serde(default, alias = "title")]
    pub position: String,

    pub status: JobStatus,

    /// 応募日 (YYYY-MM-DD)。解析できない値もそのまま保持する
    #[serde(default)]
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// 未知のフィールド（新旧スキーマ互換のため書き戻す）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRecord {
    /// 入力からレコードを組み立てる
    pub fn from_input(id: JobId, input: JobInput) -> Self {
        Self {
            id,
            company: input.company,
            position: input.position,
            status: input.status,
            date: input.date,
            link: input.link,
            notes: input.notes,
            platform: input.platform,
            follow_up_date: input.follow_up_date,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// 応募日をパース（不正な値は None）
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_job_date(&self.date)
    }
}

/// 新規登録の入力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    pub company: String,
    #[serde(alias = "title")]
    pub position: String,
    pub status: JobStatus,
    pub date: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub platform: Option<String>,
    pub follow_up_date: Option<String>,
}

/// 部分更新
///
/// `Some` のフィールドだけが上書きされ、それ以外は変更されない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<JobStatus>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub platform: Option<String>,
    pub follow_up_date: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        *self == JobPatch::default()
    }

    /// レコードにマージ
    pub fn apply_to(&self, record: &mut JobRecord) {
        if let Some(company) = &self.company {
            record.company = company.clone();
        }
        if let Some(position) = &self.position {
            record.position = position.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(date) = &self.date {
            record.date = date.clone();
        }
        if let Some(link) = &self.link {
            record.link = Some(link.clone());
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
        if let Some(platform) = &self.platform {
            record.platform = Some(platform.clone());
        }
        if let Some(follow_up_date) = &self.follow_up_date {
            record.follow_up_date = Some(follow_up_date.clone());
        }
    }
}

/// 応募日の文字列をパース
///
/// `YYYY-MM-DD` と RFC 3339 の日時を受け付ける。日時の場合は記載どおりの暦日を使う。
pub fn parse_job_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// 入力検証用: 不正な日付は InvalidDate
pub fn validate_job_date(s: &str) -> Result<NaiveDate> {
    parse_job_date(s).ok_or_else(|| Error::InvalidDate(s.to_string()))
}
