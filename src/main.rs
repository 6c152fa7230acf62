use caption_form::{cli, client, config, error, picker, render, session};
use caption_form_common::UploadForm;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;

    match cli.command {
        Commands::Caption { image } => {
            let client_config = config.resolve(cli.api_url.as_deref(), cli.timeout)?;
            let client = client::CaptionClient::new(&client_config)?;
            log::info!("endpoint: {} (timeout {:?})", client.endpoint(), client_config.timeout);

            let file = picker::pick_file(&image)?;
            let mut session = session::Session::new(client);
            session.select(Some(file)).await?;

            println!("{}\n", render::render_form(session.form()));
            println!("⏳ 送信中...\n");

            let outcome = session.submit().await;
            log::info!("settled: {}", session.form().phase().as_str());
            println!("{}", render::render_form(session.form()));
            outcome?;
        }

        Commands::Preview { image, output } => {
            let file = picker::pick_file(&image)?;
            let mut form = UploadForm::new();
            if let Some(ticket) = form.select_file(Some(file.clone())) {
                form.preview_decoded(ticket, file.to_data_uri());
            }
            let data_uri = form.preview().unwrap_or_default();

            match output {
                Some(path) => {
                    std::fs::write(&path, data_uri)?;
                    println!("✔ プレビューを保存: {}", path.display());
                }
                None => println!("{}", data_uri),
            }
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let mut config = config;
            let changed = set_api_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_api_url {
                config.set_api_base_url(url)?;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout_seconds(seconds)?;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let resolved = config.resolve(cli.api_url.as_deref(), cli.timeout)?;
                println!("設定:");
                let origin = if config.api_base_url.is_empty() {
                    "(同一オリジン)"
                } else {
                    config.api_base_url.as_str()
                };
                println!("  APIオリジン: {}", origin);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  送信先: {}", resolved.caption_endpoint());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
