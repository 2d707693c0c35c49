use clap::{Parser, Subcommand};
use menu_wizard_common::Plan;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-wizard")]
#[command(about = "メニュー撮影から3品レビューまでのデモウィザード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// メニュー写真からデモを通しで実行（抽出 → 3品選択 → 確認 → 申込）
    Run {
        /// メニュー写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// プラン (39/69)
        #[arg(short, long)]
        plan: Option<Plan>,

        /// 説明文の言語プリセット (friendly_nations/eu_focus/asia_mix)
        #[arg(long)]
        preset: Option<String>,

        /// デモセッションID（省略時は自動採番）
        #[arg(long)]
        session_id: Option<String>,
    },

    /// メニュー写真から品目候補を抽出してJSONを出力
    Extract {
        /// メニュー写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 店舗ヒアリング（未確認品目を1件ずつ確認）
    Hearing {
        /// セッションID
        #[arg(long, required = true)]
        session_id: String,
    },

    /// 設定を管理
    Config {
        /// API接続先を設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
