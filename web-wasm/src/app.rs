//! メインアプリケーションコンポーネント

use caption_form_common::ClientConfig;
use leptos::prelude::*;

use crate::components::{footer::Footer, header::Header, upload_form::UploadForm};

/// メインアプリケーションコンポーネント
///
/// 設定は起動時に解決したものを受け取り、フォームへそのまま渡す
#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    view! {
        <div class="container">
            <Header />

            <main>
                <UploadForm config=config />
            </main>

            <Footer />
        </div>
    }
}
