//! 説明文生成結果のキャッシュ
//!
//! セッションID・プラン・トーン・言語・選択品目のフィンガープリントからキーを作り、
//! 同じ条件での再生成をスキップする。上限なし、セッション終了まで保持。

use crate::api::{ApiClient, Transport, DEFAULT_TONE_STYLE};
use crate::config::Plan;
use crate::error::Result;
use crate::types::{CacheInfo, MenuItem, PreviewItem, PreviewResponse};
use std::collections::HashMap;

/// 選択品目の識別情報を連結したフィンガープリント
///
/// 品目ごとに `name|price|category`、品目間は `||`。選択順を保つ。
pub fn fingerprint_items(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|it| format!("{}|{}|{}", it.name_ja, it.price_raw(), it.category()))
        .collect::<Vec<_>>()
        .join("||")
}

/// 生成条件
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewQuery<'a> {
    pub session_id: &'a str,
    pub plan: Plan,
    pub tone_style: &'a str,
    pub langs: &'a [String],
    pub items: &'a [MenuItem],
}

impl PreviewQuery<'_> {
    fn tone(&self) -> &str {
        if self.tone_style.is_empty() {
            DEFAULT_TONE_STYLE
        } else {
            self.tone_style
        }
    }

    /// `sessionId:plan:tone:langs:fingerprint`（言語はソートして連結）
    pub fn cache_key(&self) -> String {
        let mut langs: Vec<&str> = self.langs.iter().map(String::as_str).collect();
        langs.sort_unstable();
        format!(
            "{}:{}:{}:{}:{}",
            self.session_id,
            self.plan.code(),
            self.tone(),
            langs.join(","),
            fingerprint_items(self.items)
        )
    }
}

/// 生成結果キャッシュ
#[derive(Debug, Clone, Default)]
pub struct PreviewCache {
    entries: HashMap<String, PreviewResponse>,
}

impl PreviewCache {
    /// キャッシュをルックアップ（hit注記付きで返す）
    pub fn get(&self, key: &str) -> Option<PreviewResponse> {
        self.entries.get(key).map(|stored| {
            let mut res = stored.clone();
            res.cache = Some(CacheInfo {
                hit: true,
                cache_key: key.to_string(),
            });
            res
        })
    }

    /// miss注記を付けて保存し、保存した内容を返す
    pub fn insert(&mut self, key: String, mut response: PreviewResponse) -> PreviewResponse {
        response.cache = Some(CacheInfo {
            hit: false,
            cache_key: key.clone(),
        });
        self.entries.insert(key, response.clone());
        response
    }

    /// 保存済みエントリ内の品目（ローカル編集をキャッシュにも残す）
    pub fn item_mut(&mut self, key: &str, tmp_item_id: &str) -> Option<&mut PreviewItem> {
        self.entries.get_mut(key)?.item_mut(tmp_item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// キャッシュを確認してから生成APIを呼ぶ
pub async fn fetch_preview<T: Transport>(
    api: &ApiClient<T>,
    cache: &mut PreviewCache,
    query: &PreviewQuery<'_>,
) -> Result<PreviewResponse> {
    let key = query.cache_key();
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(cache_key = %key, "preview cache hit");
        return Ok(hit);
    }

    tracing::debug!(cache_key = %key, "preview cache miss");
    let response = api
        .generate_preview(query.plan, query.langs, query.tone())
        .await?;
    Ok(cache.insert(key, response))
}
