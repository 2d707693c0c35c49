//! バックエンドAPIクライアント
//!
//! 通信そのものは `Transport` に任せ、ここでは状態の値をリクエストへ組み立て、
//! レスポンスを型に変換するだけ。キャッシュは扱わない（cache.rs 側で判断する）。

use crate::config::{DemoConfig, Plan};
use crate::error::Result;
use crate::types::{
    CompletePayload, ExtractResponse, HearingActionResponse, HearingEdit, ImagePayload,
    PreviewResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

pub const EXTRACT_ITEMS_PATH: &str = "/api/demo/extract_items";
pub const SELECT_ITEMS_PATH: &str = "/api/demo/select_items";
pub const UPLOAD_ITEM_IMAGE_PATH: &str = "/api/demo/upload_item_image";
pub const GENERATE_PREVIEW_PATH: &str = "/api/demo/generate_preview";
pub const COMPLETE_PATH: &str = "/api/demo/complete";

pub const DEFAULT_TONE_STYLE: &str = "standard";

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// リクエスト本文
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// application/x-www-form-urlencoded
    Form(String),
}

impl Body {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Empty => None,
            Body::Json(_) => Some("application/json"),
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
}

/// 送信するリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// apiBase + path（クエリ込み）
    pub url: String,
    /// エラー報告用のパス
    pub path: String,
    pub body: Body,
}

/// HTTP送信の抽象
///
/// 2xx以外は `Error::RequestFailed`、通信失敗は `Error::Transport` を返すこと。
/// 空のレスポンス本文は `Value::Null` とする。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<Value>;
}

/// APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    api_base: String,
    session_id: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &DemoConfig) -> Self {
        Self {
            transport,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            session_id: config.demo_session_id.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}{}", self.api_base, path),
            path: path.to_string(),
            body: Body::Json(serde_json::to_value(body)?),
        };
        self.send(request).await
    }

    async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "api request");
        let path = request.path.clone();
        let value = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(%path, error = %e, "api request failed");
        })?;
        Ok(serde_json::from_value(value)?)
    }

    /// メニュー画像から品目候補を抽出
    pub async fn extract_items(&self, image: &ImagePayload) -> Result<ExtractResponse> {
        self.post(
            EXTRACT_ITEMS_PATH,
            &json!({
                "demo_session_id": self.session_id,
                "image": image,
            }),
        )
        .await
    }

    /// 選択した3品をサーバ側で確定
    pub async fn select_items(&self, selected_tmp_item_ids: &[String]) -> Result<Value> {
        self.post(
            SELECT_ITEMS_PATH,
            &json!({
                "demo_session_id": self.session_id,
                "selected_tmp_item_ids": selected_tmp_item_ids,
            }),
        )
        .await
    }

    /// 品目写真の保存（ベストエフォート）
    pub async fn upload_item_image(&self, tmp_item_id: &str, image: &ImagePayload) -> Result<Value> {
        self.post(
            UPLOAD_ITEM_IMAGE_PATH,
            &json!({
                "demo_session_id": self.session_id,
                "tmp_item_id": tmp_item_id,
                "image": image,
            }),
        )
        .await
    }

    /// 多言語説明文を生成
    pub async fn generate_preview(
        &self,
        plan: Plan,
        langs: &[String],
        tone_style: &str,
    ) -> Result<PreviewResponse> {
        let tone_style = if tone_style.is_empty() {
            DEFAULT_TONE_STYLE
        } else {
            tone_style
        };
        self.post(
            GENERATE_PREVIEW_PATH,
            &json!({
                "demo_session_id": self.session_id,
                "plan_code": plan.code(),
                "preview_langs": langs,
                "tone_style": tone_style,
            }),
        )
        .await
    }

    /// デモを確定
    pub async fn complete_demo(&self, payload: &CompletePayload) -> Result<Value> {
        let mut body = serde_json::to_value(payload)?;
        if let Value::Object(map) = &mut body {
            map.insert("demo_session_id".to_string(), json!(self.session_id));
        }
        self.post(COMPLETE_PATH, &body).await
    }

    /// 次の未確認品目（ヒアリング）
    pub async fn next_hearing_item(&self) -> Result<HearingActionResponse> {
        let path = format!("/api/phase3/session/{}/next", encode_segment(&self.session_id));
        let request = HttpRequest {
            method: Method::Get,
            url: format!("{}{}", self.api_base, path),
            path,
            body: Body::Empty,
        };
        self.send(request).await
    }

    /// 品目をそのまま承認（ヒアリング）
    pub async fn approve_hearing_item(&self, tmp_item_id: &str) -> Result<HearingActionResponse> {
        let path = format!("/api/phase3/item/{}/approve", encode_segment(tmp_item_id));
        let request = HttpRequest {
            method: Method::Post,
            url: self.url_with_session_query(&path),
            path,
            body: Body::Json(json!({ "session_id": self.session_id })),
        };
        self.send(request).await
    }

    /// 品名・価格・カテゴリを修正して承認（ヒアリング）
    pub async fn edit_hearing_item(
        &self,
        tmp_item_id: &str,
        edit: &HearingEdit,
    ) -> Result<HearingActionResponse> {
        let path = format!("/api/phase3/item/{}/edit", encode_segment(tmp_item_id));
        let request = HttpRequest {
            method: Method::Post,
            url: self.url_with_session_query(&path),
            path,
            body: Body::Form(edit.to_form_body()),
        };
        self.send(request).await
    }

    fn url_with_session_query(&self, path: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("session_id", &self.session_id)
            .finish();
        format!("{}{}?{}", self.api_base, path, query)
    }
}

/// パスセグメント用のエンコード
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
