//! 端末向けの表示整形

use job_tracker_common::{JobRecord, MonthBucket, Summary};
use serde::Serialize;
use std::fmt::Write;

/// 棒グラフの最大幅（文字数）
const BAR_WIDTH: usize = 30;

/// `stats --json` の出力
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub summary: Summary,
    pub monthly: Vec<MonthBucket>,
}

/// 一覧の1行
pub fn format_job_line(record: &JobRecord) -> String {
    let date = if record.date.is_empty() { "-" } else { record.date.as_str() };
    format!(
        "{:<14} {:<10} {:<9} {} / {}",
        record.id.to_string(),
        date,
        record.status.as_str(),
        record.company,
        record.position
    )
}

/// 詳細表示
pub fn format_job_detail(record: &JobRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:       {}", record.id);
    let _ = writeln!(out, "会社:     {}", record.company);
    let _ = writeln!(out, "職種:     {}", record.position);
    let _ = writeln!(out, "状態:     {}", record.status);
    let _ = writeln!(out, "応募日:   {}", record.date);

    let optional = [
        ("経路", &record.platform),
        ("URL", &record.link),
        ("メモ", &record.notes),
        ("フォロー", &record.follow_up_date),
        ("登録", &record.created_at),
        ("更新", &record.updated_at),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }
    out
}

/// 統計カードと月次推移
pub fn render_stats(summary: &Summary, monthly: &[MonthBucket]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "応募総数:   {}", summary.total);
    let _ = writeln!(out, "選考中:     {}", summary.active);
    let _ = writeln!(out, "内定率:     {}%", summary.success_rate);
    let _ = writeln!(out, "面接到達率: {}%", summary.interview_rate);
    let _ = writeln!(out);

    let _ = writeln!(out, "ステータス別:");
    for (status, count) in summary.counts.iter() {
        let _ = writeln!(out, "  {:<9} {:>4}", status.as_str(), count);
    }

    if !monthly.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "月別応募数:");
        let max = monthly.iter().map(|b| b.count).max().unwrap_or(0);
        for bucket in monthly {
            let _ = writeln!(
                out,
                "  {} {} {:>4} {}",
                bucket.label,
                bucket.year,
                bucket.count,
                bar(bucket.count, max)
            );
        }
    }
    out
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH + max - 1) / max;
    "█".repeat(width)
}
