//! ファイル選択
//!
//! ブラウザのファイルピッカーと同じく PNG/JPEG/GIF の1枚だけを受け付ける

use crate::error::{CaptionFormError, Result};
use caption_form_common::{ImageKind, SelectedFile};
use std::path::Path;

pub fn pick_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(CaptionFormError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if !is_supported(path) {
        return Err(CaptionFormError::UnsupportedImage(file_name));
    }

    let bytes = std::fs::read(path)?;
    Ok(SelectedFile::from_bytes(file_name, bytes)?)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ImageKind::from_extension(&ext.to_string_lossy()).is_some())
        .unwrap_or(false)
}
