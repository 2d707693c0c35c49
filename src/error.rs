use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuWizardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("API接続先が設定されていません。`menu-wizard config --set-api-base URL` で設定してください")]
    MissingApiBase,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("品目を抽出できませんでした: {0}")]
    NoItems(String),

    #[error(transparent)]
    Wizard(#[from] menu_wizard_common::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MenuWizardError>;
