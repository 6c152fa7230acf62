//! 画像キャプション生成フォーム（CLIフロントエンド）

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod picker;
pub mod render;
pub mod session;
