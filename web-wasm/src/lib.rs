//! Image Captioning Web App (Leptos + WASM)

pub mod api;
mod app;
mod components;
mod logger;

use app::App;
use caption_form_common::ClientConfig;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// ビルド時に `CAPTION_API_URL` で指定。未指定なら同一オリジン（開発時はプロキシ経由）
const API_BASE_URL: Option<&str> = option_env!("CAPTION_API_URL");

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let config = ClientConfig::from_optional(API_BASE_URL);
    log::info!("caption endpoint: {}", config.caption_endpoint());

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
