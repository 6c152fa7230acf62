//! ブラウザ上で動かすテスト（wasm-pack test --headless --firefox）

#![cfg(target_arch = "wasm32")]

use caption_form_common::{CaptionError, FormPhase, UploadForm};
use caption_form_web::api::{read_preview, request_caption, BrowserFile, InflightRequest};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::AbortController;

wasm_bindgen_test_configure!(run_in_browser);

/// 応答が返ってこない宛先（ルーティングされないアドレス）
const SILENT_ENDPOINT: &str = "http://10.255.255.1/api/caption";

/// 誰もリッスンしていないポート
const REFUSED_ENDPOINT: &str = "http://127.0.0.1:1/api/caption";

fn dog_png() -> BrowserFile {
    let parts = js_sys::Array::of1(&JsValue::from_str("\u{89}PNG"));
    let options = web_sys::FilePropertyBag::new();
    options.set_type("image/png");
    let file = web_sys::File::new_with_str_sequence_and_options(&parts, "dog.png", &options)
        .expect("File作成失敗");
    BrowserFile::new(file)
}

#[wasm_bindgen_test]
fn form_state_machine_runs_in_browser() {
    let mut form: UploadForm = UploadForm::new();
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.begin_submit().is_err());
    assert_eq!(form.visible_error(), Some("Please select an image file first."));
}

#[wasm_bindgen_test]
fn form_data_accepts_image_field() {
    let form_data = web_sys::FormData::new().unwrap();
    form_data
        .append_with_str(caption_form_common::IMAGE_FIELD, "placeholder")
        .unwrap();
    assert!(form_data.has(caption_form_common::IMAGE_FIELD));
}

#[wasm_bindgen_test]
async fn request_times_out_and_aborts() {
    let controller = AbortController::new().unwrap();
    let result = request_caption(SILENT_ENDPOINT, &dog_png(), 1, &controller).await;

    assert_eq!(result, Err(CaptionError::Timeout));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Request timeout. Please try again."
    );
    assert!(controller.signal().aborted());
}

#[wasm_bindgen_test]
async fn refused_connection_is_network_error() {
    let controller = AbortController::new().unwrap();
    let result = request_caption(REFUSED_ENDPOINT, &dog_png(), 30_000, &controller).await;

    let message = result.expect_err("成功してしまった").to_string();
    assert!(message.starts_with("Network error: "), "unexpected: {}", message);
    assert!(!controller.signal().aborted());
}

#[wasm_bindgen_test]
async fn superseded_request_outcome_is_dropped() {
    let mut form: UploadForm<BrowserFile> = UploadForm::new();
    let mut inflight = InflightRequest::new();

    form.select_file(Some(dog_png()));
    let submission = form.begin_submit().expect("送信失敗");
    let controller = AbortController::new().unwrap();
    inflight.start(submission.ticket, controller.clone());

    // 送信中に別のファイルを選び直す
    assert!(inflight.cancel());
    form.select_file(Some(dog_png()));
    assert!(controller.signal().aborted());

    let outcome = request_caption(SILENT_ENDPOINT, &submission.file, 30_000, &controller).await;
    assert!(outcome.is_err());
    assert!(!inflight.settle(submission.ticket));
    assert!(!form.finish_submit(submission.ticket, outcome));

    assert_eq!(form.phase(), FormPhase::FileSelected);
    assert_eq!(form.visible_error(), None);
    assert_eq!(form.visible_caption(), None);
    assert!(form.can_submit());
}

#[wasm_bindgen_test]
fn inflight_slot_clears_on_settle() {
    let mut form: UploadForm<BrowserFile> = UploadForm::new();
    let mut inflight = InflightRequest::new();
    assert!(!inflight.is_active());

    form.select_file(Some(dog_png()));
    let first = form.begin_submit().expect("送信失敗");
    let controller = AbortController::new().unwrap();
    inflight.start(first.ticket, controller.clone());
    assert!(inflight.is_active());

    form.finish_submit(first.ticket, Ok("a dog".into()));
    assert!(inflight.settle(first.ticket));
    assert!(!inflight.is_active());
    assert!(!controller.signal().aborted());

    // 完了後の選び直しでは何も中断しない
    assert!(!inflight.cancel());

    // 古いチケットの完了通知は新しい送信を消さない
    let second = form.begin_submit().expect("送信失敗");
    inflight.start(second.ticket, AbortController::new().unwrap());
    assert!(!inflight.settle(first.ticket));
    assert!(inflight.is_active());
    assert!(inflight.settle(second.ticket));
}

#[wasm_bindgen_test]
async fn preview_is_data_uri() {
    let data_uri = read_preview(&dog_png()).await.expect("読み込み失敗");
    assert!(data_uri.starts_with("data:image/png;base64,"), "unexpected: {}", data_uri);
}
