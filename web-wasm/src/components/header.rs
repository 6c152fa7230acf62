//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <h1>"🖼️ Image Captioning"</h1>
            <p>"Upload an image and generate a caption for it!"</p>
        </header>
    }
}
