use caption_form_common::CaptionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionFormError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です（PNG/JPEG/GIFのみ）: {0}")]
    UnsupportedImage(String),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("{0}")]
    Caption(#[from] CaptionError),

    #[error("送信中のリクエストがあります")]
    SubmitInFlight,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<caption_form_common::Error> for CaptionFormError {
    fn from(e: caption_form_common::Error) -> Self {
        match e {
            caption_form_common::Error::UnsupportedImage(name) => CaptionFormError::UnsupportedImage(name),
        }
    }
}

pub type Result<T> = std::result::Result<T, CaptionFormError>;
