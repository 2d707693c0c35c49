//! 起動設定
//!
//! ホスト側から注入される接続パラメータ。起動時に一度だけ検証してSessionに渡す。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 注入される設定オブジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoConfig {
    pub api_base: String,
    pub demo_session_id: String,
    pub preview_preset: Option<String>,
    pub default_plan: Option<u16>,
    pub mode: Option<String>,
}

impl DemoConfig {
    pub fn new(api_base: impl Into<String>, demo_session_id: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            demo_session_id: demo_session_id.into(),
            ..Default::default()
        }
    }

    /// 必須項目（apiBase / demoSessionId）を検証
    pub fn validate(self) -> Result<Self> {
        let mut missing = Vec::new();
        if self.api_base.trim().is_empty() {
            missing.push("apiBase");
        }
        if self.demo_session_id.trim().is_empty() {
            missing.push("demoSessionId");
        }
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "設定が不足しています（{}）",
                missing.join(" / ")
            )));
        }
        Ok(Self {
            api_base: self.api_base.trim_end_matches('/').to_string(),
            ..self
        })
    }

    pub fn preset(&self) -> PreviewPreset {
        self.preview_preset
            .as_deref()
            .map(PreviewPreset::parse)
            .unwrap_or_default()
    }

    pub fn plan(&self) -> Plan {
        self.default_plan
            .and_then(Plan::from_code)
            .unwrap_or_default()
    }

    pub fn mode(&self) -> UiMode {
        match self.mode.as_deref() {
            Some("hearing") => UiMode::Hearing,
            _ => UiMode::Demo,
        }
    }
}

/// 料金プラン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Plan {
    /// 39コース: AI説明文なし
    #[default]
    Basic,
    /// 69コース: 多言語AI説明文あり
    Generative,
}

impl Plan {
    pub fn code(self) -> u16 {
        match self {
            Plan::Basic => 39,
            Plan::Generative => 69,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            39 => Some(Plan::Basic),
            69 => Some(Plan::Generative),
            _ => None,
        }
    }

    /// 生成・編集が許可されるか
    pub fn generates_text(self) -> bool {
        matches!(self, Plan::Generative)
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Plan::from_code)
            .ok_or_else(|| format!("Unknown plan: {}. Use 39 or 69", s))
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 説明文の言語プリセット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewPreset {
    /// en + zh-Hant + de（親日寄せ）
    #[default]
    FriendlyNations,
    EuFocus,
    AsiaMix,
}

impl PreviewPreset {
    /// 未知の名前はFriendlyNations
    pub fn parse(name: &str) -> Self {
        match name {
            "eu_focus" => PreviewPreset::EuFocus,
            "asia_mix" => PreviewPreset::AsiaMix,
            _ => PreviewPreset::FriendlyNations,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PreviewPreset::FriendlyNations => "friendly_nations",
            PreviewPreset::EuFocus => "eu_focus",
            PreviewPreset::AsiaMix => "asia_mix",
        }
    }

    pub fn langs(self) -> [&'static str; 3] {
        match self {
            PreviewPreset::FriendlyNations => ["en", "zh-Hant", "de"],
            PreviewPreset::EuFocus => ["en", "de", "fr"],
            PreviewPreset::AsiaMix => ["en", "ko", "zh-Hant"],
        }
    }
}

/// UIモード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Demo,
    /// 品目ごとのヒアリング確認
    Hearing,
}
