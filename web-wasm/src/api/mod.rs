//! キャプションAPI連携（ブラウザ）

pub mod caption;
pub mod inflight;

pub use caption::{read_preview, request_caption, BrowserFile};
pub use inflight::InflightRequest;
