//! テスト用のTransport/Surface

#![allow(dead_code)]

use menu_wizard_common::render::{CardView, HearingCardView, LangOption, ProgressView, SelectRow};
use menu_wizard_common::{
    DemoConfig, EditorDraft, Error, HttpRequest, Plan, Result, Session, Step, Surface, Transport,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// 用意したレスポンス
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
}

/// パスごとに応答を返し、送信内容を記録する
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同じパスへの応答をキューに積む（最後の1件は使い回す）
    pub fn reply(self, path: &str, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.path == path).count()
    }

    pub fn last(&self, path: &str) -> Option<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value> {
        let path = request.path.clone();
        self.requests.borrow_mut().push(request);

        let reply = {
            let mut replies = self.replies.borrow_mut();
            let queue = replies.get_mut(&path);
            match queue {
                Some(q) if q.len() > 1 => q.pop_front(),
                Some(q) => q.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status, body)) => Err(Error::RequestFailed { path, status, body }),
            None => Err(Error::Transport(format!("no reply for {}", path))),
        }
    }
}

/// 描画内容を記録するSurface
#[derive(Default)]
pub struct RecordingSurface {
    pub step: Option<Step>,
    pub select_rows: Vec<SelectRow>,
    pub select_count: String,
    pub confirm_enabled: bool,
    pub reverted: Vec<String>,
    pub lang_options: Vec<LangOption>,
    pub active_lang: String,
    pub plan: Option<Plan>,
    pub card: Option<CardView>,
    pub hearing_card: Option<HearingCardView>,
    pub progress: Option<ProgressView>,
    pub card_exits: usize,
    /// 退場演出が始まった時点で表示中だったカード
    pub exited_cards: Vec<String>,
    pub editor: Option<EditorDraft>,
    pub complete_shown: usize,
    pub toasts: Vec<String>,
    pub loading: bool,
    pub modal: Option<String>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    /// confirm() の返答
    pub confirm_answer: bool,
}

impl RecordingSurface {
    pub fn last_toast(&self) -> Option<&str> {
        self.toasts.last().map(String::as_str)
    }
}

impl Surface for RecordingSurface {
    fn set_step(&mut self, step: Step) {
        self.step = Some(step);
    }

    fn set_select_list(&mut self, rows: &[SelectRow]) {
        self.select_rows = rows.to_vec();
    }

    fn set_select_count(&mut self, label: &str, confirm_enabled: bool) {
        self.select_count = label.to_string();
        self.confirm_enabled = confirm_enabled;
    }

    fn set_item_checked(&mut self, tmp_item_id: &str, checked: bool) {
        if !checked {
            self.reverted.push(tmp_item_id.to_string());
        }
    }

    fn set_lang_options(&mut self, options: &[LangOption], active: &str) {
        self.lang_options = options.to_vec();
        self.active_lang = active.to_string();
    }

    fn set_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
    }

    fn set_card(&mut self, card: &CardView) {
        self.card = Some(card.clone());
    }

    fn set_hearing_card(&mut self, card: &HearingCardView) {
        self.hearing_card = Some(card.clone());
    }

    fn set_progress(&mut self, progress: &ProgressView) {
        self.progress = Some(progress.clone());
    }

    async fn animate_card_exit(&mut self) {
        self.card_exits += 1;
        if let Some(card) = &self.card {
            self.exited_cards.push(card.tmp_item_id.clone());
        }
    }

    fn open_editor(&mut self, draft: &EditorDraft) {
        self.editor = Some(draft.clone());
    }

    fn close_editor(&mut self) {
        self.editor = None;
    }

    fn show_complete(&mut self) {
        self.complete_shown += 1;
    }

    fn show_toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }

    fn show_loading(&mut self, on: bool) {
        self.loading = on;
    }

    fn open_modal(&mut self, src: &str) {
        self.modal = Some(src.to_string());
    }

    fn close_modal(&mut self) {
        self.modal = None;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }
}

pub const SESSION_ID: &str = "demo-test";

pub fn config() -> DemoConfig {
    DemoConfig::new("http://backend.test", SESSION_ID)
}

pub fn session() -> Session {
    Session::new(config())
}

/// extract_items のレスポンス（n品）
pub fn extracted(n: usize) -> Value {
    let items: Vec<Value> = (1..=n)
        .map(|i| {
            json!({
                "tmp_item_id": format!("it_{:02}", i),
                "name_ja": format!("品目{}", i),
                "price": { "amount": 500 + i as i64 * 100, "currency": "JPY", "raw": format!("¥{}", 500 + i * 100) },
                "category_ja": "一品料理",
                "confidence": 0.9,
                "warnings": []
            })
        })
        .collect();
    json!({ "demo_session_id": SESSION_ID, "items": items, "policy": { "max_items": 10 } })
}

/// generate_preview のレスポンス
pub fn preview(ids: &[&str]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "tmp_item_id": id,
                "ja": {
                    "name": format!("{}の名前", id),
                    "review_18s": format!("{}は香ばしい", id),
                    "how_to_eat": "塩で",
                    "pairing": "日本酒"
                },
                "en": {
                    "name": format!("{} name", id),
                    "review_18s": format!("{} is savory", id),
                    "how_to_eat": null,
                    "pairing": "Sake"
                },
                "zh-Hant": null,
                "de": null
            })
        })
        .collect();
    json!({ "demo_session_id": SESSION_ID, "plan_code": 69, "items": items, "cache": { "hit": false } })
}

pub fn ok() -> Reply {
    Reply::Json(json!({ "status": "ok" }))
}
