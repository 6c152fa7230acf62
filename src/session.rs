//! フォームの駆動
//!
//! ファイル選択 → プレビュー生成 → 送信 → 結果反映 を UploadForm に流す

use crate::client::CaptionClient;
use crate::error::{CaptionFormError, Result};
use caption_form_common::{CaptionError, SelectedFile, SubmitRejected, UploadForm};

pub struct Session {
    form: UploadForm<SelectedFile>,
    client: CaptionClient,
}

impl Session {
    pub fn new(client: CaptionClient) -> Self {
        Self {
            form: UploadForm::new(),
            client,
        }
    }

    pub fn form(&self) -> &UploadForm<SelectedFile> {
        &self.form
    }

    /// ファイル選択。プレビューはブロッキングスレッドでエンコードする
    pub async fn select(&mut self, file: Option<SelectedFile>) -> Result<()> {
        let Some(ticket) = self.form.select_file(file.clone()) else {
            return Ok(());
        };
        let Some(file) = file else {
            return Ok(());
        };

        let data_uri = tokio::task::spawn_blocking(move || file.to_data_uri())
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        self.form.preview_decoded(ticket, data_uri);
        Ok(())
    }

    /// 送信して終端状態まで待つ。フォームにも同じ結果が反映される
    pub async fn submit(&mut self) -> Result<String> {
        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(SubmitRejected::NoFile) => {
                log::warn!("submit without a file");
                return Err(CaptionError::NoFileSelected.into());
            }
            Err(SubmitRejected::InFlight) => {
                log::warn!("submit while a request is in flight");
                return Err(CaptionFormError::SubmitInFlight);
            }
        };

        let outcome = self.client.caption(&submission.file).await;
        self.form.finish_submit(submission.ticket, outcome.clone());
        Ok(outcome?)
    }
}
