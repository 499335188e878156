use chrono::Local;
use clap::Parser;
use dialoguer::Confirm;
use job_tracker::{cli, config, error, logging, open_store, report};
use job_tracker_common::{
    monthly_histogram, sort_by_date, summarize, validate_job_date, JobFilter, JobInput, JobPatch,
};
use cli::{Cli, Commands};
use config::{validate_months, Config};
use error::{Result, TrackerError};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Add { company, position, status, date, link, notes, platform, follow_up } => {
            if company.trim().is_empty() || position.trim().is_empty() {
                return Err(TrackerError::InvalidInput("会社名と職種は必須です".into()));
            }

            let date = match date {
                Some(d) => {
                    validate_job_date(&d)?;
                    d
                }
                None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
            };

            let mut store = open_store(&config)?;
            let record = store.add(JobInput {
                company,
                position,
                status,
                date,
                link,
                notes,
                platform,
                follow_up_date: follow_up,
            })?;
            println!("✔ 登録しました (ID: {})", record.id);
        }

        Commands::List { search, status, platform, sort, json } => {
            let store = open_store(&config)?;
            let filter = JobFilter {
                term: search.unwrap_or_default(),
                status,
                platform,
            };
            let mut jobs = filter.apply(store.records());
            sort_by_date(&mut jobs, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&jobs)?);
            } else if jobs.is_empty() {
                if store.is_empty() {
                    println!("応募記録がありません。`job-tracker add` で登録してください");
                } else {
                    println!("条件に一致する応募がありません");
                }
            } else {
                for job in &jobs {
                    println!("{}", report::format_job_line(job));
                }
                println!("\n{}件 / 全{}件", jobs.len(), store.len());
            }
        }

        Commands::Show { id } => {
            let store = open_store(&config)?;
            let record = store
                .get_by_id(&id)
                .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
            print!("{}", report::format_job_detail(record));
        }

        Commands::Update { id, company, position, status, date, link, notes, platform, follow_up } => {
            if let Some(d) = &date {
                validate_job_date(d)?;
            }

            let patch = JobPatch {
                company,
                position,
                status,
                date,
                link,
                notes,
                platform,
                follow_up_date: follow_up,
            };
            if patch.is_empty() {
                return Err(TrackerError::InvalidInput("更新するフィールドを指定してください".into()));
            }

            let mut store = open_store(&config)?;
            let record = store.update(&id, &patch)?;
            println!("✔ 更新しました");
            println!("{}", report::format_job_line(&record));
        }

        Commands::Remove { id, yes } => {
            let mut store = open_store(&config)?;
            let record = store
                .get_by_id(&id)
                .ok_or_else(|| TrackerError::NotFound(id.clone()))?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("{} / {} を削除しますか？", record.company, record.position))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("キャンセルしました");
                    return Ok(());
                }
            }

            if store.remove(&id)? {
                println!("✔ 削除しました (ID: {})", id);
            }
        }

        Commands::Stats { today, months, json } => {
            let store = open_store(&config)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            // 設定ファイルを手で書き換えた場合もここで弾く
            let months = validate_months(months.unwrap_or(config.months_back))?;

            let summary = summarize(store.records());
            let monthly = monthly_histogram(store.records(), today, months);

            if json {
                let stats = report::StatsReport { summary, monthly };
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", report::render_stats(&summary, &monthly));
            }
        }

        Commands::Config { set_data_dir, set_months_back, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データ保存先を設定しました");
            }

            if let Some(months) = set_months_back {
                config.set_months_back(months)?;
                println!("✔ 月次推移の月数を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  データ保存先: {}", config.resolve_data_dir()?.display());
                println!("  保存キー: {}", config.storage_key);
                println!("  月次推移: {}か月", config.months_back);
            }
        }
    }

    Ok(())
}
