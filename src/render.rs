//! フォームのテキスト描画
//!
//! ブラウザ版と同じ並び（ヘッダー → ファイル → プレビュー → ボタン → 状態 → フッター）

use caption_form_common::{FileHandle, UploadForm};
use std::fmt::Write;

pub const TITLE: &str = "🖼️ Image Captioning";
pub const SUBTITLE: &str = "Upload an image and generate a caption for it!";
pub const FOOTER: &str = "Powered by advanced image captioning";

const PREVIEW_WIDTH: usize = 48;

pub fn render_form<F: FileHandle>(form: &UploadForm<F>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", SUBTITLE);
    let _ = writeln!(out);
    let _ = writeln!(out, "[ {} ]", form.file_label());

    if let Some(preview) = form.preview() {
        let _ = writeln!(out, "Image Preview: {}", abbreviate(preview));
    }

    if form.has_file() {
        let state = if form.can_submit() { "" } else { " (disabled)" };
        let _ = writeln!(out, "< {} >{}", form.submit_label(), state);
    }

    if form.is_loading() {
        let _ = writeln!(out, "Processing...");
    }

    if let Some(error) = form.visible_error() {
        let _ = writeln!(out, "Error: {}", error);
    }

    if let Some(caption) = form.visible_caption() {
        let _ = writeln!(out, "Generated Caption:");
        let _ = writeln!(out, "{}", caption);
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", FOOTER);
    out
}

/// Data URIは長いので先頭だけ表示
fn abbreviate(data_uri: &str) -> String {
    if data_uri.chars().count() <= PREVIEW_WIDTH {
        return data_uri.to_string();
    }
    let head: String = data_uri.chars().take(PREVIEW_WIDTH).collect();
    format!("{}… ({} chars)", head, data_uri.len())
}
