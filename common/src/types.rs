//! APIで受け渡しする型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - MenuItem: 抽出された品目候補
//! - ImagePayload: Base64画像
//! - PreviewResponse: 多言語説明文の生成結果
//! - HearingItem: ヒアリング（確認）フローの品目

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 価格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub amount: Option<i64>,
    pub currency: String,
    /// メニュー表記そのまま（"¥1,200" 等）
    pub raw: String,
}

/// 抽出された品目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub tmp_item_id: String,
    #[serde(default)]
    pub name_ja: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub category_ja: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

fn default_confidence() -> f64 {
    1.0
}

impl MenuItem {
    pub fn price_raw(&self) -> &str {
        &self.price.raw
    }

    pub fn category(&self) -> &str {
        self.category_ja.as_deref().unwrap_or("")
    }
}

/// Base64エンコード済み画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub base64: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, base64: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        Self {
            mime_type: if mime_type.is_empty() {
                DEFAULT_MIME_TYPE.to_string()
            } else {
                mime_type
            },
            base64: base64.into(),
        }
    }

    /// "data:image/jpeg;base64,/9j/4AAQ..." 形式から生成
    ///
    /// カンマ以降が無い場合はNone
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let base64 = data_url.split(',').nth(1)?;
        let mime_type = data_url
            .strip_prefix("data:")
            .and_then(|s| s.split(';').next())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);
        Some(Self::new(mime_type, base64))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// extract_items のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractResponse {
    pub demo_session_id: String,
    pub items: Vec<MenuItem>,
    pub policy: Option<serde_json::Value>,
}

/// 1言語分の生成テキスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemContent {
    pub name: String,
    pub review_18s: String,
    pub how_to_eat: Option<String>,
    pub pairing: Option<String>,
}

/// 品目ごとの生成結果（言語コード → テキスト）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub tmp_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<serde_json::Value>,
    /// "ja", "en", "zh-Hant" ... 未生成の言語はnull
    #[serde(flatten)]
    pub langs: BTreeMap<String, Option<ItemContent>>,
}

impl PreviewItem {
    pub fn content(&self, lang: &str) -> Option<&ItemContent> {
        self.langs.get(lang).and_then(|c| c.as_ref())
    }
}

/// キャッシュ注記
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheInfo {
    pub hit: bool,
    pub cache_key: String,
}

/// generate_preview のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewResponse {
    pub demo_session_id: String,
    pub plan_code: u16,
    pub items: Vec<PreviewItem>,
    pub cache: Option<CacheInfo>,
}

impl PreviewResponse {
    pub fn item(&self, tmp_item_id: &str) -> Option<&PreviewItem> {
        self.items.iter().find(|x| x.tmp_item_id == tmp_item_id)
    }

    pub fn item_mut(&mut self, tmp_item_id: &str) -> Option<&mut PreviewItem> {
        self.items.iter_mut().find(|x| x.tmp_item_id == tmp_item_id)
    }

    pub fn is_cache_hit(&self) -> bool {
        self.cache.as_ref().is_some_and(|c| c.hit)
    }
}

/// complete のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletePayload {
    pub plan: u16,
    pub selected_tmp_item_ids: Vec<String>,
    pub item_images_count: usize,
}

/// ヒアリング対象の品目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HearingItem {
    pub tmp_item_id: String,
    pub name_ja_raw: Option<String>,
    pub price_val: Option<i64>,
    pub category_raw: Option<String>,
    pub name_ja_confirmed: Option<String>,
    pub price_val_confirmed: Option<i64>,
    pub category_confirmed: Option<String>,
    pub confirm_status: String,
    pub is_recommended: bool,
}

/// ヒアリングAPIのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HearingActionResponse {
    pub success: bool,
    pub next_item: Option<HearingItem>,
    pub completed: bool,
    pub message: Option<String>,
}

/// ヒアリング修正フォーム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HearingEdit {
    pub name: String,
    pub price: i64,
    pub category: String,
}

impl HearingEdit {
    /// application/x-www-form-urlencoded 本文
    pub fn to_form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("name", &self.name)
            .append_pair("price", &self.price.to_string())
            .append_pair("category", &self.category)
            .finish()
    }
}
