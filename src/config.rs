use crate::error::{CaptionFormError, Result};
use caption_form_common::{ClientConfig, REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// APIのオリジンを上書きする環境変数
pub const API_URL_ENV: &str = "CAPTION_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".into(),
            timeout_seconds: REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CaptionFormError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("caption-form").join("config.json"))
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        self.api_base_url = validate_base_url(&url)?;
        Ok(())
    }

    pub fn set_timeout_seconds(&mut self, seconds: u64) -> Result<()> {
        self.timeout_seconds = validate_timeout(seconds)?;
        Ok(())
    }

    /// 起動時に一度だけ解決する
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 設定ファイル
    pub fn resolve(&self, api_url: Option<&str>, timeout_seconds: Option<u64>) -> Result<ClientConfig> {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.resolve_with_env(api_url, timeout_seconds, env_url.as_deref())
    }

    pub fn resolve_with_env(
        &self,
        api_url: Option<&str>,
        timeout_seconds: Option<u64>,
        env_url: Option<&str>,
    ) -> Result<ClientConfig> {
        let base = match api_url.or(env_url) {
            Some(url) => validate_base_url(url)?,
            None => self.api_base_url.clone(),
        };
        let seconds = validate_timeout(timeout_seconds.unwrap_or(self.timeout_seconds))?;

        Ok(ClientConfig::new(base).with_timeout(Duration::from_secs(seconds)))
    }
}

fn validate_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(CaptionFormError::Config(format!(
            "APIのURLは http:// か https:// で始めてください: {}",
            url
        )))
    }
}

fn validate_timeout(seconds: u64) -> Result<u64> {
    if seconds == 0 {
        return Err(CaptionFormError::Config("タイムアウトは1秒以上にしてください".into()));
    }
    Ok(seconds)
}
