use anyhow::Context;
use clap::Parser;
use menu_wizard::image::load_image;
use menu_wizard::{cli, config, terminal, transport, wizard};
use menu_wizard_common::{ApiClient, Controller, Session};
use cli::{Cli, Commands};
use config::Config;
use terminal::TerminalSurface;
use tracing_subscriber::EnvFilter;
use transport::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めませんでした")?;

    match cli.command {
        Commands::Run { image, plan, preset, session_id } => {
            println!("🍽  menu-wizard - デモ\n");

            let demo = config.demo_config(session_id, plan, preset, None)?;
            let payload = load_image(&image, config.max_image_size)?;
            tracing::info!(session_id = %demo.demo_session_id, "demo session");

            let transport = ReqwestTransport::new(config.timeout_seconds)?;
            let mut controller = Controller::new(Session::new(demo), transport, TerminalSurface::new())
                .with_tone_style(config.tone_style.clone());
            wizard::run_demo(&mut controller, payload, config.max_image_size).await?;
        }

        Commands::Extract { image, output } => {
            let demo = config.demo_config(None, None, None, None)?;
            let payload = load_image(&image, config.max_image_size)?;

            let transport = ReqwestTransport::new(config.timeout_seconds)?;
            let api = ApiClient::new(transport, &demo);
            let res = api.extract_items(&payload).await?;

            let json = serde_json::to_string_pretty(&res.items)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("✔ {}品目を保存: {}", res.items.len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Hearing { session_id } => {
            println!("📝 menu-wizard - ヒアリング\n");

            let demo = config.demo_config(Some(session_id), None, None, Some("hearing"))?;
            let transport = ReqwestTransport::new(config.timeout_seconds)?;
            let mut controller = Controller::new(Session::new(demo), transport, TerminalSurface::new());
            wizard::run_hearing(&mut controller).await?;
        }

        Commands::Config { set_api_base, show } => {
            let mut config = config;

            if let Some(base) = set_api_base {
                config.set_api_base(base)?;
                println!("✔ API接続先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  API接続先: {}", config.api_base().unwrap_or_else(|_| "未設定".into()));
                println!("  既定プラン: {}", config.default_plan);
                println!("  言語プリセット: {}", config.preview_preset);
                println!("  トーン: {}", config.tone_style);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
