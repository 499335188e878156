//! 一覧画面の検索・絞り込み・並び替え

use crate::types::{JobRecord, JobStatus};
use std::cmp::Ordering;
use std::str::FromStr;

/// 並び順
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// 登録順（並び替えなし）
    #[default]
    Inserted,
    NewestFirst,
    OldestFirst,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inserted" | "none" => Ok(SortOrder::Inserted),
            "newest" | "desc" => Ok(SortOrder::NewestFirst),
            "oldest" | "asc" => Ok(SortOrder::OldestFirst),
            _ => Err(format!("Unknown sort order: {}. Use inserted, newest, or oldest", s)),
        }
    }
}

/// 検索語・ステータス・応募経路の組み合わせ
///
/// 検索語は職種・会社名・メモの部分一致、応募経路は完全一致。どちらも大文字小文字を区別しない。
#[derive(Clone, Debug, Default)]
pub struct JobFilter {
    pub term: String,
    pub status: Option<JobStatus>,
    pub platform: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, record: &JobRecord) -> bool {
        matches_term(record, &self.term.to_lowercase())
            && self.status.map_or(true, |s| record.status == s)
            && self.platform.as_deref().map_or(true, |p| matches_platform(record, p))
    }

    pub fn apply<'a>(&self, records: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// 記録に現れる応募経路（重複なし・昇順）。絞り込みの選択肢に使う
pub fn platforms(records: &[JobRecord]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for platform in records.iter().filter_map(|r| r.platform.as_deref()) {
        let platform = platform.trim();
        if !platform.is_empty() && !found.iter().any(|p| p.eq_ignore_ascii_case(platform)) {
            found.push(platform.to_string());
        }
    }
    found.sort_by_key(|p| p.to_lowercase());
    found
}

/// 応募日で並び替え（安定ソート）。日付が不正なものは常に末尾
pub fn sort_by_date(records: &mut [&JobRecord], order: SortOrder) {
    if order == SortOrder::Inserted {
        return;
    }
    records.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) => match order {
            SortOrder::NewestFirst => y.cmp(&x),
            _ => x.cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn matches_platform(record: &JobRecord, platform: &str) -> bool {
    let platform = platform.trim();
    platform.is_empty()
        || record
            .platform
            .as_deref()
            .is_some_and(|p| p.trim().to_lowercase() == platform.to_lowercase())
}

fn matches_term(record: &JobRecord, lowered_term: &str) -> bool {
    if lowered_term.is_empty() {
        return true;
    }
    record.position.to_lowercase().contains(lowered_term)
        || record.company.to_lowercase().contains(lowered_term)
        || record
            .notes
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(lowered_term))
}
