//! アップロードフォームコンポーネント
//!
//! 状態は共通ライブラリの UploadForm が持ち、ここではイベントとI/Oをつなぐだけ

use caption_form_common::{ClientConfig, SubmitRejected, UploadForm as FormState, ACCEPT_ATTRIBUTE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{AbortController, HtmlInputElement};

use crate::api::{caption::js_failure, read_preview, request_caption, BrowserFile, InflightRequest};
use crate::components::{
    image_preview::ImagePreview,
    loading_indicator::LoadingIndicator,
    result_panel::{CaptionPanel, ErrorPanel},
};

#[component]
pub fn UploadForm(config: ClientConfig) -> impl IntoView {
    let form = RwSignal::new_local(FormState::<BrowserFile>::new());
    let inflight = StoredValue::new_local(InflightRequest::new());

    let endpoint = config.caption_endpoint();
    let timeout_ms = config.timeout_millis();

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input
            .files()
            .and_then(|files| files.get(0))
            .map(BrowserFile::new);

        // 新しい選択は送信中のリクエストを打ち切る
        inflight.update_value(|slot| {
            slot.cancel();
        });

        let ticket = form.try_update(|f| f.select_file(file.clone())).flatten();
        if let (Some(ticket), Some(file)) = (ticket, file) {
            spawn_local(async move {
                match read_preview(&file).await {
                    Ok(data_uri) => form.update(|f| {
                        f.preview_decoded(ticket, data_uri);
                    }),
                    Err(e) => log::error!("preview failed: {}", e),
                }
            });
        }
    };

    let on_submit = move |_: web_sys::MouseEvent| {
        let submission = match form.try_update(|f| f.begin_submit()) {
            Some(Ok(submission)) => submission,
            // 未選択のエラーはフォーム側で表示済み
            Some(Err(SubmitRejected::NoFile | SubmitRejected::InFlight)) | None => return,
        };

        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                form.update(|f| {
                    f.finish_submit(submission.ticket, Err(js_failure(e)));
                });
                return;
            }
        };
        inflight.update_value(|slot| slot.start(submission.ticket, controller.clone()));

        let endpoint = endpoint.clone();
        spawn_local(async move {
            let outcome = request_caption(&endpoint, &submission.file, timeout_ms, &controller).await;
            inflight.try_update_value(|slot| slot.settle(submission.ticket));
            form.update(|f| {
                f.finish_submit(submission.ticket, outcome);
            });
        });
    };

    view! {
        <div class="upload-section">
            <input
                type="file"
                id="fileInput"
                accept=ACCEPT_ATTRIBUTE
                on:change=on_change
            />
            <label for="fileInput" class="file-label">
                {move || form.with(|f| f.file_label().to_string())}
            </label>
        </div>

        {move || form.with(|f| f.preview().map(|src| view! { <ImagePreview src=src.to_string() /> }))}

        <Show when=move || form.with(|f| f.has_file())>
            <button
                class="submit-button"
                disabled=move || form.with(|f| !f.can_submit())
                on:click=on_submit.clone()
            >
                {move || form.with(|f| f.submit_label())}
            </button>
        </Show>

        <Show when=move || form.with(|f| f.is_loading())>
            <LoadingIndicator />
        </Show>

        {move || form.with(|f| f.visible_error().map(|e| view! { <ErrorPanel message=e.to_string() /> }))}

        {move || form.with(|f| f.visible_caption().map(|c| view! { <CaptionPanel caption=c.to_string() /> }))}
    }
}
