//! 共有型の定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ImageKind: 受け付ける画像形式
//! - SelectedFile: 選択された画像（バイト列 + ファイル名 + MIMEタイプ）
//! - CaptionResponse / ErrorBody: キャプションAPIのレスポンス本文

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// multipartで画像を載せるフィールド名
pub const IMAGE_FIELD: &str = "image";

/// ファイル選択の accept 属性
pub const ACCEPT_ATTRIBUTE: &str = "image/png, image/jpeg, image/gif";

/// 受け付ける画像形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
        }
    }

    /// 拡張子から判定（大文字小文字は区別しない）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }
}

/// 選択された画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// ファイル名の拡張子から形式を判定して作成
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let kind = ImageKind::from_file_name(&name)
            .ok_or_else(|| Error::UnsupportedImage(name.clone()))?;

        Ok(Self {
            name,
            mime_type: kind.mime_type().to_string(),
            bytes,
        })
    }

    pub fn to_data_uri(&self) -> String {
        crate::data_uri::encode_data_uri(&self.mime_type, &self.bytes)
    }
}

/// 成功時のレスポンス本文
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptionResponse {
    pub caption: String,
}

/// 失敗時のレスポンス本文（`error` は任意）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
