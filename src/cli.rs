use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "caption-form")]
#[command(about = "画像を選んでキャプションAPIに送信し、生成されたキャプションを表示する", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのオリジン（例: http://localhost:5000）。環境変数・設定ファイルより優先
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// タイムアウト秒数
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像のキャプションを生成
    Caption {
        /// 画像ファイル（PNG/JPEG/GIF）
        #[arg(required = true)]
        image: PathBuf,
    },

    /// プレビュー用のData URIを出力
    Preview {
        /// 画像ファイル（PNG/JPEG/GIF）
        #[arg(required = true)]
        image: PathBuf,

        /// 出力ファイル（デフォルト: 標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定
    Config {
        /// APIのオリジンを保存
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト秒数を保存
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
