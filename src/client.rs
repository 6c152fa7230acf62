//! キャプションAPIクライアント（reqwest）

use crate::error::{CaptionFormError, Result};
use caption_form_common::{
    interpret_response, CaptionError, ClientConfig, FailureReport, SelectedFile, IMAGE_FIELD,
};
use reqwest::multipart::{Form, Part};

pub struct CaptionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CaptionClient {
    /// タイムアウトはクライアント全体に設定する（リトライはしない）
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CaptionFormError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.caption_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 画像を multipart の `image` フィールドで1回だけ POST する
    pub async fn caption(&self, file: &SelectedFile) -> std::result::Result<String, CaptionError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(classify)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        log::debug!("Making request to: {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        log::debug!("response {}: {} bytes", status, body.len());

        interpret_response(status, &body)
    }
}

fn classify(e: reqwest::Error) -> CaptionError {
    let report = if e.is_timeout() {
        FailureReport::timeout()
    } else {
        FailureReport::transport(e.to_string())
    };
    report.classify()
}
