//! 結果表示（エラー / キャプション）

use leptos::prelude::*;

#[component]
pub fn ErrorPanel(message: String) -> impl IntoView {
    view! {
        <div class="error-message">
            <p>{error_text(&message)}</p>
        </div>
    }
}

#[component]
pub fn CaptionPanel(caption: String) -> impl IntoView {
    view! {
        <div class="caption-result">
            <h2>"Generated Caption:"</h2>
            <p>{caption}</p>
        </div>
    }
}

fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}
