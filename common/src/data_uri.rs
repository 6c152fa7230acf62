//! プレビュー表示用の `data:<mime>;base64,<payload>` を作る

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// バイト列からData URIを作成
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
