//! 応募状況の集計
//!
//! すべて副作用なしの純粋関数。「今日」は必ず引数で受け取り、内部で時計を読まない。

use crate::types::{JobRecord, JobStatus};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// 月次グラフのデフォルト期間
pub const DEFAULT_MONTHS_BACK: usize = 6;

/// CLIで指定できる月数の上限（10年）
pub const MAX_MONTHS_BACK: usize = 120;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// ステータス別件数（4種すべて常に存在）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::Applied => self.applied,
            JobStatus::Interview => self.interview,
            JobStatus::Offer => self.offer,
            JobStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.interview + self.offer + self.rejected
    }

    /// 円グラフ用（Applied, Interview, Offer, Rejected の順）
    pub fn iter(&self) -> impl Iterator<Item = (JobStatus, usize)> + '_ {
        JobStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    fn increment(&mut self, status: JobStatus) {
        match status {
            JobStatus::Applied => self.applied += 1,
            JobStatus::Interview => self.interview += 1,
            JobStatus::Offer => self.offer += 1,
            JobStatus::Rejected => self.rejected += 1,
        }
    }
}

/// 月次グラフの1区間
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub label: &'static str,
    pub count: usize,
}

/// ダッシュボードの統計カード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub success_rate: u32,
    pub interview_rate: u32,
    pub counts: StatusCounts,
}

pub fn status_counts(records: &[JobRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for record in records {
        counts.increment(record.status);
    }
    counts
}

/// 選考中（Applied + Interview）の件数
pub fn active_count(records: &[JobRecord]) -> usize {
    records.iter().filter(|r| r.status.is_active()).count()
}

/// 内定率 (%)。0件なら0
pub fn success_rate(records: &[JobRecord]) -> u32 {
    let offers = records.iter().filter(|r| r.status == JobStatus::Offer).count();
    percentage(offers, records.len())
}

/// 面接到達率 (%)。Interview + Offer が対象。0件なら0
pub fn interview_rate(records: &[JobRecord]) -> u32 {
    let reached = records.iter().filter(|r| r.status.reached_interview()).count();
    percentage(reached, records.len())
}

/// 統計カード一式
pub fn summarize(records: &[JobRecord]) -> Summary {
    let counts = status_counts(records);
    Summary {
        total: records.len(),
        active: counts.applied + counts.interview,
        success_rate: percentage(counts.offer, records.len()),
        interview_rate: percentage(counts.interview + counts.offer, records.len()),
        counts,
    }
}

/// 直近 `months_back` か月の月別応募数（古い順、`reference` の月を含む）
///
/// 応募日が解析できないレコードは数えない。`months_back` が0なら空。
pub fn monthly_histogram(
    records: &[JobRecord],
    reference: NaiveDate,
    months_back: usize,
) -> Vec<MonthBucket> {
    let parsed: Vec<NaiveDate> = records.iter().filter_map(JobRecord::parsed_date).collect();
    let ref_index = month_index(reference.year(), reference.month());

    (0..months_back)
        .map(|i| {
            let offset = (months_back - 1 - i) as i64;
            let (year, month) = from_month_index(ref_index - offset);
            let count = parsed
                .iter()
                .filter(|d| d.year() == year && d.month() == month)
                .count();
            MonthBucket {
                year,
                month,
                label: MONTH_LABELS[(month - 1) as usize],
                count,
            }
        })
        .collect()
}

/// 四捨五入したパーセンテージ（分母0は0）
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part as u64;
    let total = total as u64;
    ((200 * part + total) / (2 * total)) as u32
}

/// 年月を西暦0年1月からの通し月数に変換
fn month_index(year: i32, month: u32) -> i64 {
    year as i64 * 12 + (month as i64 - 1)
}

fn from_month_index(index: i64) -> (i32, u32) {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}
