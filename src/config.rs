use crate::error::{MenuWizardError, Result};
use menu_wizard_common::{DemoConfig, Plan, PreviewPreset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 環境変数で接続先を上書き
pub const API_BASE_ENV: &str = "MENU_WIZARD_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Option<String>,
    pub default_plan: u16,
    pub preview_preset: String,
    pub tone_style: String,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            default_plan: Plan::Basic.code(),
            preview_preset: PreviewPreset::FriendlyNations.name().into(),
            tone_style: "standard".into(),
            max_image_size: 1600,
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MenuWizardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("menu-wizard").join("config.json"))
    }

    /// 接続先（環境変数を優先）
    pub fn api_base(&self) -> Result<String> {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                return Ok(base);
            }
        }

        self.api_base
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(MenuWizardError::MissingApiBase)
    }

    pub fn set_api_base(&mut self, base: String) -> Result<()> {
        self.api_base = Some(base);
        self.save()
    }

    /// ウィザード用の設定を組み立てる
    pub fn demo_config(
        &self,
        session_id: Option<String>,
        plan: Option<Plan>,
        preset: Option<String>,
        mode: Option<&str>,
    ) -> Result<DemoConfig> {
        let config = DemoConfig {
            api_base: self.api_base()?,
            demo_session_id: session_id.unwrap_or_else(new_session_id),
            preview_preset: Some(preset.unwrap_or_else(|| self.preview_preset.clone())),
            default_plan: Some(plan.map(Plan::code).unwrap_or(self.default_plan)),
            mode: mode.map(str::to_string),
        };
        Ok(config.validate()?)
    }
}

pub fn new_session_id() -> String {
    format!("demo-{}", uuid::Uuid::new_v4().simple())
}
