//! プレビューコンポーネント

use leptos::prelude::*;

#[component]
pub fn ImagePreview(src: String) -> impl IntoView {
    view! {
        <div class="image-preview-container">
            <h2>"Image Preview:"</h2>
            <img src=src alt="Selected preview" class="image-preview" />
        </div>
    }
}
