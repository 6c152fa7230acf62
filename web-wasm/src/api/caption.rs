//! キャプションAPI呼び出し（fetch + AbortController）
//!
//! タイムアウトはfetchとタイマーを競争させ、タイマーが勝ったらリクエストを中断する

use caption_form_common::{interpret_response, CaptionError, FailureReport, FileHandle, IMAGE_FIELD};
use futures::future::{select, Either};
use futures::pin_mut;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, FormData, Request, RequestInit, Response};

/// ブラウザで選択されたファイル
#[derive(Clone, Debug)]
pub struct BrowserFile {
    file: web_sys::File,
    name: String,
    mime_type: String,
}

impl BrowserFile {
    pub fn new(file: web_sys::File) -> Self {
        let name = file.name();
        let mime_type = file.type_();
        Self { file, name, mime_type }
    }

    pub fn file(&self) -> &web_sys::File {
        &self.file
    }
}

impl FileHandle for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// プレビュー用のData URIを読み込む
pub async fn read_preview(file: &BrowserFile) -> Result<String, String> {
    let blob = gloo::file::File::from(file.file().clone());
    gloo::file::futures::read_as_data_url(&blob)
        .await
        .map_err(|e| e.to_string())
}

/// 画像を multipart の `image` フィールドで POST し、キャプションを返す
///
/// # Arguments
/// * `endpoint` - 送信先URL（起動時に解決済み）
/// * `file` - 選択されたファイル
/// * `timeout_ms` - タイムアウト（ミリ秒）
/// * `controller` - 中断用。新しい選択が来たら呼び出し側が abort する
pub async fn request_caption(
    endpoint: &str,
    file: &BrowserFile,
    timeout_ms: u32,
    controller: &AbortController,
) -> Result<String, CaptionError> {
    let request = build_request(endpoint, file, controller).map_err(js_failure)?;
    log::debug!("Making request to: {}", endpoint);

    let exchange = send(request);
    let timer = TimeoutFuture::new(timeout_ms);
    pin_mut!(exchange, timer);

    match select(exchange, timer).await {
        Either::Left((Ok((status, body)), _)) => interpret_response(status, &body),
        Either::Left((Err(e), _)) => Err(js_failure(e)),
        Either::Right(_) => {
            controller.abort();
            Err(FailureReport::timeout().classify())
        }
    }
}

fn build_request(
    endpoint: &str,
    file: &BrowserFile,
    controller: &AbortController,
) -> Result<Request, JsValue> {
    let form_data = FormData::new()?;
    form_data.append_with_blob_and_filename(IMAGE_FIELD, file.file(), file.name())?;

    // Content-Type はブラウザが boundary 付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form_data);
    opts.set_signal(Some(&controller.signal()));

    Request::new_with_str_and_init(endpoint, &opts)
}

async fn send(request: Request) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let text = JsFuture::from(resp.text()?).await?;
    Ok((status, text.as_string().unwrap_or_default()))
}

/// JSの例外を分類（メッセージがあれば通信エラー、なければ不明）
pub fn js_failure(value: JsValue) -> CaptionError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string());
    failure_from_message(message)
}

fn failure_from_message(message: Option<String>) -> CaptionError {
    match message {
        Some(message) => FailureReport::transport(message).classify(),
        None => FailureReport::default().classify(),
    }
}
