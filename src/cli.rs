use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crate::config::validate_months;
use job_tracker_common::{JobId, JobStatus, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-tracker")]
#[command(about = "応募状況トラッカー（記録・集計・月次推移）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 応募を登録
    Add {
        /// 会社名
        #[arg(required = true)]
        company: String,

        /// 職種
        #[arg(required = true)]
        position: String,

        /// ステータス (applied/interview/offer/rejected)
        #[arg(short, long, default_value = "applied")]
        status: JobStatus,

        /// 応募日 YYYY-MM-DD（省略時は今日）
        #[arg(short, long)]
        date: Option<String>,

        /// 求人URL
        #[arg(long)]
        link: Option<String>,

        /// メモ
        #[arg(short, long)]
        notes: Option<String>,

        /// 応募経路（LinkedIn等）
        #[arg(short, long)]
        platform: Option<String>,

        /// フォローアップ予定日
        #[arg(long)]
        follow_up: Option<String>,
    },

    /// 応募一覧を表示
    List {
        /// 職種・会社名・メモで検索
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// ステータスで絞り込み
        #[arg(short, long)]
        status: Option<JobStatus>,

        /// 応募経路で絞り込み（大文字小文字を区別しない）
        #[arg(long)]
        platform: Option<String>,

        /// 並び順 (inserted/newest/oldest)
        #[arg(long, default_value = "inserted")]
        sort: SortOrder,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 1件の詳細を表示
    Show {
        #[arg(required = true)]
        id: JobId,
    },

    /// 応募内容を更新（指定したフィールドのみ）
    Update {
        #[arg(required = true)]
        id: JobId,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(short, long)]
        status: Option<JobStatus>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        link: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        follow_up: Option<String>,
    },

    /// 応募を削除
    Remove {
        #[arg(required = true)]
        id: JobId,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 統計と月次推移を表示
    Stats {
        /// 基準日 YYYY-MM-DD（省略時は今日）
        #[arg(long)]
        today: Option<NaiveDate>,

        /// 月次推移の月数 1〜120（省略時は設定値）
        #[arg(short, long, value_parser = parse_months)]
        months: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// データ保存ディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 月次推移のデフォルト月数を設定
        #[arg(long)]
        set_months_back: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

fn parse_months(s: &str) -> Result<usize, String> {
    let months: usize = s.parse().map_err(|e| format!("{}: {}", s, e))?;
    validate_months(months).map_err(|e| e.to_string())
}
