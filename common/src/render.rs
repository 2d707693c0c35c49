//! Session状態からビューへの射影
//!
//! ここで計算するのは表示内容だけ。例外は全体再描画時の `is_editing` リセットのみ。
//! カードを描き直した後は登録済みのオブザーバを呼び、各フロントエンドが
//! カード単位のコントロール（編集欄など）を作り直せるようにする。

use crate::config::{Plan, UiMode};
use crate::state::{Session, Step, REQUIRED_SELECTION};
use crate::surface::Surface;
use crate::types::{HearingItem, MenuItem};

pub const BASIC_PLAN_PLACEHOLDER: &str = "（39コースでは食レポは空欄のままでOKです）";
pub const PENDING_PLACEHOLDER: &str = "（生成待ち）";
pub const NOT_TARGET_PLACEHOLDER: &str = "（生成対象外）";
pub const EMPTY_PLACEHOLDER: &str = "（生成なし）";
pub const HEARING_PROGRESS_LABEL: &str = "未確認の品目を1つずつ確認します";
pub const COMPLETE_TOAST: &str = "🎉 お疲れさまでした！";

/// カードに表示する説明文
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveText {
    pub title: String,
    pub body: String,
    pub editable: bool,
}

impl ActiveText {
    fn fixed(body: &str) -> Self {
        Self {
            title: String::new(),
            body: body.to_string(),
            editable: false,
        }
    }
}

/// 品目の説明文を現在のプラン・言語で組み立て
pub fn active_text(session: &Session, tmp_item_id: &str) -> ActiveText {
    if session.plan == Plan::Basic {
        return ActiveText::fixed(BASIC_PLAN_PLACEHOLDER);
    }
    let Some(generated) = &session.generated else {
        return ActiveText::fixed(PENDING_PLACEHOLDER);
    };
    let Some(item) = generated.item(tmp_item_id) else {
        return ActiveText::fixed(NOT_TARGET_PLACEHOLDER);
    };

    let content = item
        .content(&session.active_lang)
        .or_else(|| item.content("ja"));

    let mut segments = Vec::new();
    if let Some(t) = content {
        if !t.review_18s.is_empty() {
            segments.push(t.review_18s.clone());
        }
        if let Some(how) = t.how_to_eat.as_deref().filter(|s| !s.is_empty()) {
            segments.push(format!("食べ方：{}", how));
        }
        if let Some(pair) = t.pairing.as_deref().filter(|s| !s.is_empty()) {
            segments.push(format!("ペアリング：{}", pair));
        }
    }

    let body = segments.join("\n\n");
    ActiveText {
        title: String::new(),
        body: if body.is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            body
        },
        editable: true,
    }
}

/// 進捗に応じた励ましメッセージ
pub fn encouragement(current_index: usize, total: usize) -> &'static str {
    let total = if total == 0 { REQUIRED_SELECTION } else { total };
    let p = (current_index + 1) as f64 / total as f64;
    if p >= 0.9 {
        "あと1品です！頑張りましょう 🏁"
    } else if p >= 0.75 {
        "もうすぐ終わります！あと少し 🚀"
    } else if p >= 0.5 {
        "ちょうど半分まできました！⭐"
    } else if p >= 0.25 {
        "いい調子です！あと少しです 💪"
    } else {
        "それでは1品目から始めましょう！"
    }
}

pub fn progress_label(current_index: usize, total: usize) -> String {
    format!("{} / {} 品目", current_index + 1, total)
}

pub fn select_count_label(count: usize) -> String {
    format!("{} / {}", count, REQUIRED_SELECTION)
}

/// 言語コードの表示名
pub fn lang_label(code: &str) -> &str {
    match code {
        "ja" => "日本語",
        "en" => "English",
        "de" => "Deutsch",
        "zh-Hant" => "繁體中文",
        "fr" => "Français",
        "ko" => "한국어",
        other => other,
    }
}

/// 言語選択肢
#[derive(Debug, Clone, PartialEq)]
pub struct LangOption {
    pub code: String,
    pub label: String,
}

/// 選択リストの1行
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRow {
    pub tmp_item_id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub checked: bool,
}

impl SelectRow {
    fn from_item(item: &MenuItem, checked: bool) -> Self {
        Self {
            tmp_item_id: item.tmp_item_id.clone(),
            name: item.name_ja.clone(),
            category: item.category().to_string(),
            price: item.price_raw().to_string(),
            checked,
        }
    }
}

/// 確認カード
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub tmp_item_id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    /// 添付写真のdata URL
    pub image: Option<String>,
    pub text: ActiveText,
}

/// ヒアリング用カード
#[derive(Debug, Clone, PartialEq)]
pub struct HearingCardView {
    pub tmp_item_id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub recommended: bool,
}

impl HearingCardView {
    pub fn from_item(item: &HearingItem) -> Self {
        Self {
            tmp_item_id: item.tmp_item_id.clone(),
            name: item.name_ja_raw.clone().unwrap_or_default(),
            price: item
                .price_val
                .map(|p| format!("{}円", p))
                .unwrap_or_default(),
            category: item.category_raw.clone().unwrap_or_default(),
            recommended: item.is_recommended,
        }
    }

}

/// 進捗表示
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub label: String,
    pub encouragement: String,
    pub back_visible: bool,
}

type AfterCardRender = Box<dyn FnMut(&Session)>;

/// 描画担当
pub struct Renderer<S> {
    surface: S,
    after_card_render: Vec<AfterCardRender>,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            after_card_render: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// カード描画後のフックを登録
    pub fn on_after_card_render(&mut self, hook: impl FnMut(&Session) + 'static) {
        self.after_card_render.push(Box::new(hook));
    }

    pub fn set_step(&mut self, session: &mut Session, step: Step) {
        session.step = step;
        self.surface.set_step(step);
    }

    pub fn show_toast(&mut self, message: &str) {
        self.surface.show_toast(message);
    }

    pub fn show_loading(&mut self, on: bool) {
        self.surface.show_loading(on);
    }

    pub fn render_select_list(&mut self, session: &Session) {
        let rows: Vec<SelectRow> = session
            .extracted_items
            .iter()
            .map(|it| SelectRow::from_item(it, session.selected_ids.contains(&it.tmp_item_id)))
            .collect();
        self.surface.set_select_list(&rows);
        self.update_select_count(session);
    }

    pub fn update_select_count(&mut self, session: &Session) {
        self.surface.set_select_count(
            &select_count_label(session.selected_ids.len()),
            session.selection_ready(),
        );
    }

    pub fn render_lang_options(&mut self, session: &Session) {
        let options: Vec<LangOption> = session
            .available_langs()
            .into_iter()
            .map(|code| LangOption {
                label: lang_label(&code).to_string(),
                code,
            })
            .collect();
        self.surface.set_lang_options(&options, &session.active_lang);
    }

    pub fn render_plan(&mut self, session: &Session) {
        self.surface.set_plan(session.plan);
    }

    /// 現在のカードを全体再描画
    pub fn render_card(&mut self, session: &mut Session) {
        session.is_editing = false;

        if session.is_complete() {
            self.surface.show_complete();
            self.surface.show_toast(COMPLETE_TOAST);
        } else {
            match session.mode() {
                UiMode::Demo => self.draw_demo_card(session),
                UiMode::Hearing => self.draw_hearing_card(session),
            }
        }

        let session: &Session = session;
        for hook in self.after_card_render.iter_mut() {
            hook(session);
        }
    }

    fn draw_demo_card(&mut self, session: &Session) {
        let Some(item) = session.current_item() else {
            return;
        };
        let card = CardView {
            tmp_item_id: item.tmp_item_id.clone(),
            name: item.name_ja.clone(),
            price: item.price_raw().to_string(),
            category: item.category().to_string(),
            image: session.item_image(&item.tmp_item_id).map(str::to_string),
            text: active_text(session, &item.tmp_item_id),
        };
        self.surface.set_card(&card);

        let total = session.selected_items.len();
        self.surface.set_progress(&ProgressView {
            label: progress_label(session.current_index, total),
            encouragement: encouragement(session.current_index, total).to_string(),
            back_visible: session.current_index > 0,
        });
    }

    fn draw_hearing_card(&mut self, session: &Session) {
        // 読み込み前は何も描かない
        if let Some(item) = &session.hearing.current_item {
            self.surface.set_hearing_card(&HearingCardView::from_item(item));
            // サーバ側カーソルなので戻れない
            self.surface.set_progress(&ProgressView {
                label: HEARING_PROGRESS_LABEL.to_string(),
                encouragement: String::new(),
                back_visible: false,
            });
        }
    }
}
