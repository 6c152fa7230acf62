//! アップロードフォームの状態機械
//!
//! 画面の状態はすべてここで持ち、フロントエンド（Web/CLI）はI/Oだけを担当する。
//!
//! ```text
//! Idle ──select(Some)──▶ FileSelected ──submit──▶ Submitting ──▶ Resolved | Failed
//!   ▲                        ▲                                        │
//!   └──────select(None)──────┴───────────────select(Some)─────────────┘
//! ```
//!
//! 非同期処理（プレビュー生成・送信）はチケットを持ち回る。
//! 新しい選択が来た時点で古いチケットは無効になり、遅れて届いた完了通知は捨てる。

use std::fmt;

use thiserror::Error;

use crate::error::CaptionError;
use crate::types::SelectedFile;

const CHOOSE_LABEL: &str = "Choose an image";
const SUBMIT_LABEL: &str = "✨ Generate Caption";
const SUBMITTING_LABEL: &str = "Generating Caption...";

/// フォームが保持できるファイル
///
/// CLIはバイト列を持つ `SelectedFile`、Webはブラウザの `File` ハンドルを持つ
pub trait FileHandle: Clone {
    fn name(&self) -> &str;
    fn mime_type(&self) -> &str;
}

impl FileHandle for SelectedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// ファイル選択ごとに発行されるチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionTicket(u64);

/// 送信ごとに発行されるチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmitTicket(u64);

impl fmt::Display for SelectionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selection#{}", self.0)
    }
}

impl fmt::Display for SubmitTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submit#{}", self.0)
    }
}

/// フォームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    FileSelected,
    Submitting,
    Resolved,
    Failed,
}

impl FormPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormPhase::Idle => "idle",
            FormPhase::FileSelected => "file-selected",
            FormPhase::Submitting => "submitting",
            FormPhase::Resolved => "resolved",
            FormPhase::Failed => "failed",
        }
    }
}

/// 送信を受け付けなかった理由
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// ファイル未選択（エラーメッセージを表示済み）
    #[error("no file selected")]
    NoFile,

    /// 送信中（状態は変えない）
    #[error("a request is already in flight")]
    InFlight,
}

/// 送信1回分。フロントエンドはこれを multipart POST 1件に変換する
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub ticket: SubmitTicket,
    pub file: F,
}

/// アップロードフォーム
#[derive(Debug, Clone)]
pub struct UploadForm<F = SelectedFile> {
    selected: Option<F>,
    preview: Option<String>,
    caption: String,
    error: String,
    is_loading: bool,
    last_ticket: u64,
    selection: Option<SelectionTicket>,
    submission: Option<SubmitTicket>,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            selected: None,
            preview: None,
            caption: String::new(),
            error: String::new(),
            is_loading: false,
            last_ticket: 0,
            selection: None,
            submission: None,
        }
    }
}

impl<F: FileHandle> UploadForm<F> {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// ファイル選択
    ///
    /// キャプションとエラーは常に消す。ファイルがあればプレビュー生成用のチケットを返す。
    /// 送信中だった場合、その送信は無効になる（呼び出し側でリクエストを中断する）
    pub fn select_file(&mut self, file: Option<F>) -> Option<SelectionTicket> {
        self.caption.clear();
        self.error.clear();
        self.preview = None;

        if let Some(superseded) = self.submission.take() {
            log::debug!("{} superseded by new selection", superseded);
            self.is_loading = false;
        }

        match file {
            Some(file) => {
                let ticket = SelectionTicket(self.issue());
                log::debug!("{}: {} ({})", ticket, file.name(), file.mime_type());
                self.selected = Some(file);
                self.selection = Some(ticket);
                Some(ticket)
            }
            None => {
                self.selected = None;
                self.selection = None;
                None
            }
        }
    }

    /// プレビュー生成完了。最新の選択のものだけ反映する
    pub fn preview_decoded(&mut self, ticket: SelectionTicket, data_uri: String) -> bool {
        if self.selection != Some(ticket) {
            log::debug!("dropping stale preview for {}", ticket);
            return false;
        }
        self.preview = Some(data_uri);
        true
    }

    /// 送信開始
    pub fn begin_submit(&mut self) -> Result<Submission<F>, SubmitRejected> {
        if self.is_loading {
            return Err(SubmitRejected::InFlight);
        }

        let Some(file) = self.selected.clone() else {
            self.error = CaptionError::NoFileSelected.to_string();
            return Err(SubmitRejected::NoFile);
        };

        self.is_loading = true;
        self.error.clear();
        self.caption.clear();

        let ticket = SubmitTicket(self.issue());
        self.submission = Some(ticket);
        log::debug!("{}: submitting {}", ticket, file.name());

        Ok(Submission { ticket, file })
    }

    /// 送信完了。無効になったチケットの結果は捨てる
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<String, CaptionError>,
    ) -> bool {
        if self.submission != Some(ticket) {
            log::debug!("dropping stale outcome for {}", ticket);
            return false;
        }

        self.submission = None;
        self.is_loading = false;

        match outcome {
            Ok(caption) => {
                self.error.clear();
                self.caption = caption;
            }
            Err(e) => {
                log::error!("{} failed: {}", ticket, e);
                self.caption.clear();
                self.error = e.to_string();
            }
        }
        true
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_loading {
            FormPhase::Submitting
        } else if self.selected.is_none() {
            FormPhase::Idle
        } else if !self.error.is_empty() {
            FormPhase::Failed
        } else if !self.caption.is_empty() {
            FormPhase::Resolved
        } else {
            FormPhase::FileSelected
        }
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.selected.is_some()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// ファイル名ラベル
    pub fn file_label(&self) -> &str {
        self.selected
            .as_ref()
            .map(|f| f.name())
            .unwrap_or(CHOOSE_LABEL)
    }

    pub fn can_submit(&self) -> bool {
        self.has_file() && !self.is_loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn visible_caption(&self) -> Option<&str> {
        (!self.caption.is_empty() && !self.is_loading).then_some(self.caption.as_str())
    }

    pub fn visible_error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }
}
