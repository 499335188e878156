use crate::error::{Result, TrackerError};
use job_tracker_common::{DEFAULT_MONTHS_BACK, DEFAULT_STORAGE_KEY, MAX_MONTHS_BACK};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データ保存先を上書きする環境変数
pub const DATA_DIR_ENV: &str = "JOB_TRACKER_DATA_DIR";

/// 月次推移の月数を検証（1〜MAX_MONTHS_BACK）
pub fn validate_months(months: usize) -> Result<usize> {
    if (1..=MAX_MONTHS_BACK).contains(&months) {
        Ok(months)
    } else {
        Err(TrackerError::Config(format!(
            "月数は1〜{}の範囲で指定してください: {}",
            MAX_MONTHS_BACK, months
        )))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub months_back: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            months_back: DEFAULT_MONTHS_BACK,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TrackerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("job-tracker").join("config.json"))
    }

    /// 実際に使うデータディレクトリ
    ///
    /// 優先順: 環境変数 > 設定ファイル > ~/.local/share/job-tracker
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let base = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| TrackerError::Config("データディレクトリを決定できません".into()))?;
        Ok(base.join("job-tracker"))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }

    pub fn set_months_back(&mut self, months: usize) -> Result<()> {
        self.months_back = validate_months(months)?;
        self.save()
    }
}
