//! エラー型定義
//!
//! - Error: 共通ライブラリのエラー
//! - CaptionError: キャプション生成1回分の終端エラー（画面に表示する文言を持つ）

use thiserror::Error;

use crate::types::{CaptionResponse, ErrorBody};

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// キャプション生成の失敗
///
/// Displayの文言はそのままエラーパネルに表示される
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// ファイル未選択のまま送信された（リクエストは発行しない）
    #[error("Please select an image file first.")]
    NoFileSelected,

    #[error("Request timeout. Please try again.")]
    Timeout,

    /// サービスが返した `error` フィールドをそのまま表示
    #[error("{0}")]
    Service(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("An unknown error occurred while generating the caption.")]
    Unknown,
}

/// 通信失敗時に分かっている情報
///
/// フロントエンドごとのHTTPクライアントのエラーをここに詰め替えてから分類する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport {
    pub timed_out: bool,
    pub service_error: Option<String>,
    pub message: Option<String>,
}

impl FailureReport {
    pub fn timeout() -> Self {
        Self { timed_out: true, ..Default::default() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Default::default() }
    }

    /// 優先順位: タイムアウト → サービスエラー → 通信エラー → 不明
    pub fn classify(self) -> CaptionError {
        if self.timed_out {
            return CaptionError::Timeout;
        }
        if let Some(error) = self.service_error.filter(|e| !e.is_empty()) {
            return CaptionError::Service(error);
        }
        match self.message.filter(|m| !m.is_empty()) {
            Some(message) => CaptionError::Transport(message),
            None => CaptionError::Unknown,
        }
    }
}

impl From<FailureReport> for CaptionError {
    fn from(report: FailureReport) -> Self {
        report.classify()
    }
}

/// HTTPレスポンス（ステータス + 本文）をキャプションか失敗に変換
pub fn interpret_response(status: u16, body: &str) -> std::result::Result<String, CaptionError> {
    if (200..300).contains(&status) {
        return match serde_json::from_str::<CaptionResponse>(body) {
            Ok(response) if !response.caption.trim().is_empty() => Ok(response.caption),
            Ok(_) => {
                log::warn!("empty caption in {} response", status);
                Err(CaptionError::Unknown)
            }
            Err(e) => {
                log::warn!("caption missing from {} response: {}", status, e);
                Err(CaptionError::Unknown)
            }
        };
    }

    let service_error = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);

    Err(FailureReport {
        timed_out: false,
        service_error,
        message: Some(format!("Request failed with status code {}", status)),
    }
    .classify())
}
