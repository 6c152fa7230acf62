//! クライアント設定
//!
//! 起動時に一度だけ解決し、フォームやHTTPクライアントへ明示的に渡す

use std::time::Duration;

/// キャプションAPIのパス
pub const CAPTION_PATH: &str = "/api/caption";

/// リクエストのタイムアウト（30秒）
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// APIのオリジン。空なら同一オリジン（開発時はプロキシ経由）
    pub api_base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim().to_string(),
            ..Default::default()
        }
    }

    /// 環境変数などの任意値から作成（未設定・空白のみは同一オリジン扱い）
    pub fn from_optional(api_base_url: Option<&str>) -> Self {
        Self::new(api_base_url.unwrap_or_default())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `POST` 先のURL
    pub fn caption_endpoint(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        format!("{}{}", base, CAPTION_PATH)
    }

    pub fn timeout_millis(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}
