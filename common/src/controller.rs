//! ウィザードの状態遷移
//!
//! Capture → Select → Review → Complete（Review中は Editing サブ状態あり）。
//! フロントエンドはユーザー操作を `Action` に変換して `Controller::dispatch` に渡すだけ。
//! 状態変更 → API呼び出し → 状態変更 → 再描画 の順序はすべてここで決める。
//!
//! 失敗はトースト/アラートで通知して終わり。自動リトライはしない。

use crate::api::{ApiClient, Transport, DEFAULT_TONE_STYLE};
use crate::cache::{fetch_preview, PreviewQuery};
use crate::config::{Plan, UiMode};
use crate::error::Result;
use crate::render::{active_text, Renderer};
use crate::state::{Session, Step, REQUIRED_SELECTION};
use crate::surface::{EditorDraft, Surface};
use crate::types::{CompletePayload, HearingEdit, ImagePayload, ItemContent, PreviewItem};

pub const DISCARD_EDIT_CONFIRM: &str = "編集中の内容は破棄されます。よろしいですか？";

/// ユーザー操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// メニュー写真を撮影/選択
    Capture(ImagePayload),
    ToggleSelect { tmp_item_id: String, checked: bool },
    ConfirmSelect,
    SetPlan(Plan),
    SetLang(String),
    Back,
    /// 「修正」: 編集モードへ
    Reject,
    Approve,
    SaveEdit(String),
    CancelEdit,
    AttachItemImage(ImagePayload),
    RemoveItemImage,
    OpenImage,
    CloseModal,
    /// 完了画面からの申込確定
    Submit,
    LoadNextHearingItem,
    SaveHearingEdit(HearingEdit),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Capture(_) => "capture",
            Action::ToggleSelect { .. } => "toggle_select",
            Action::ConfirmSelect => "confirm_select",
            Action::SetPlan(_) => "set_plan",
            Action::SetLang(_) => "set_lang",
            Action::Back => "back",
            Action::Reject => "reject",
            Action::Approve => "approve",
            Action::SaveEdit(_) => "save_edit",
            Action::CancelEdit => "cancel_edit",
            Action::AttachItemImage(_) => "attach_item_image",
            Action::RemoveItemImage => "remove_item_image",
            Action::OpenImage => "open_image",
            Action::CloseModal => "close_modal",
            Action::Submit => "submit",
            Action::LoadNextHearingItem => "load_next_hearing_item",
            Action::SaveHearingEdit(_) => "save_hearing_edit",
        }
    }
}

/// イベントコントローラ
pub struct Controller<T, S> {
    session: Session,
    api: ApiClient<T>,
    renderer: Renderer<S>,
    tone_style: String,
}

impl<T: Transport, S: Surface> Controller<T, S> {
    pub fn new(session: Session, transport: T, surface: S) -> Self {
        let api = ApiClient::new(transport, session.config());
        Self {
            session,
            api,
            renderer: Renderer::new(surface),
            tone_style: DEFAULT_TONE_STYLE.to_string(),
        }
    }

    pub fn with_tone_style(mut self, tone_style: impl Into<String>) -> Self {
        self.tone_style = tone_style.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<S> {
        &mut self.renderer
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    /// 起動時の初期描画
    pub async fn start(&mut self) {
        let step = self.session.step;
        self.renderer.set_step(&mut self.session, step);
        self.renderer.render_plan(&self.session);
        self.renderer.render_lang_options(&self.session);

        if self.session.mode() == UiMode::Hearing {
            self.renderer.show_loading(true);
            match self.load_next_hearing_item().await {
                Ok(()) => self.renderer.show_toast("🚀 確認スタート"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to load first hearing item");
                    self.surface_mut().alert("起動に失敗しました (Network Error?)");
                }
            }
            self.renderer.show_loading(false);
        } else {
            self.renderer.show_toast("🏁 デモ開始");
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), step = ?self.session.step, "dispatch");
        match action {
            Action::Capture(image) => self.capture(image).await,
            Action::ToggleSelect {
                tmp_item_id,
                checked,
            } => self.toggle_select(tmp_item_id, checked),
            Action::ConfirmSelect => self.confirm_select().await,
            Action::SetPlan(plan) => self.set_plan(plan).await,
            Action::SetLang(lang) => self.set_lang(&lang),
            Action::Back => self.go_back(),
            Action::Reject => self.enable_edit(),
            Action::Approve => self.approve().await,
            Action::SaveEdit(text) => self.save_edit(&text),
            Action::CancelEdit => self.cancel_edit(),
            Action::AttachItemImage(image) => self.attach_item_image(image).await,
            Action::RemoveItemImage => self.remove_item_image(),
            Action::OpenImage => self.open_image(),
            Action::CloseModal => self.surface_mut().close_modal(),
            Action::Submit => self.submit().await,
            Action::LoadNextHearingItem => {
                self.renderer.show_loading(true);
                if let Err(e) = self.load_next_hearing_item().await {
                    tracing::warn!(error = %e, "failed to load hearing item");
                    self.renderer.show_toast("❌ 読み込みに失敗しました");
                }
                self.renderer.show_loading(false);
            }
            Action::SaveHearingEdit(edit) => self.save_hearing_edit(edit).await,
        }
    }

    fn in_demo_review(&self) -> bool {
        self.session.mode() == UiMode::Demo && self.session.step == Step::Review
    }

    async fn capture(&mut self, image: ImagePayload) {
        if self.session.is_processing || self.session.step == Step::Review {
            return;
        }
        self.session.is_processing = true;
        self.renderer.show_loading(true);

        match self.api.extract_items(&image).await {
            Ok(res) => {
                self.session.replace_extracted(res.items);
                let count = self.session.extracted_items.len();
                if count < REQUIRED_SELECTION {
                    self.renderer.show_toast("❌ 品目が足りません。撮り直してください");
                    self.renderer.set_step(&mut self.session, Step::Capture);
                } else {
                    self.renderer.set_step(&mut self.session, Step::Select);
                    self.renderer.render_select_list(&self.session);
                    self.renderer
                        .show_toast(&format!("✅ {}品を抽出しました", count));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "extraction failed");
                self.renderer.show_toast("❌ 読み取りに失敗しました");
                self.renderer.set_step(&mut self.session, Step::Capture);
            }
        }

        self.renderer.show_loading(false);
        self.session.is_processing = false;
    }

    fn toggle_select(&mut self, tmp_item_id: String, checked: bool) {
        if self.session.step != Step::Select {
            return;
        }
        let known = self
            .session
            .extracted_items
            .iter()
            .any(|x| x.tmp_item_id == tmp_item_id);
        if !known {
            return;
        }

        let mut ids = self.session.selected_ids.clone();
        if checked {
            if !ids.contains(&tmp_item_id) {
                ids.push(tmp_item_id.clone());
            }
        } else {
            ids.retain(|x| x != &tmp_item_id);
        }

        // 4品目はその場で拒否してチェックを戻す
        if ids.len() > REQUIRED_SELECTION {
            self.renderer.show_toast("❌ 3つまでです");
            self.surface_mut().set_item_checked(&tmp_item_id, false);
            return;
        }

        self.session.selected_ids = ids;
        self.renderer.update_select_count(&self.session);
    }

    async fn confirm_select(&mut self) {
        if self.session.step != Step::Select || !self.session.selection_ready() {
            return;
        }
        self.renderer.show_loading(true);

        match self.api.select_items(&self.session.selected_ids).await {
            Ok(_) => {
                self.session.resolve_selected_items();
                self.session.current_index = 0;
                self.renderer.set_step(&mut self.session, Step::Review);
                self.renderer.render_lang_options(&self.session);
                if self.session.plan.generates_text() {
                    self.ensure_generated().await;
                }
                self.renderer.render_card(&mut self.session);
                self.renderer.show_toast("🚀 3品でデモ開始");
            }
            Err(e) => {
                tracing::warn!(error = %e, "select_items failed");
                self.renderer.show_toast("❌ 選択の確定に失敗しました");
            }
        }

        self.renderer.show_loading(false);
    }

    /// 69コースなら説明文を用意する（キャッシュ優先）
    async fn ensure_generated(&mut self) {
        if !self.session.plan.generates_text() {
            return;
        }
        self.renderer.show_loading(true);

        let session_id = self.session.session_id().to_string();
        let query = PreviewQuery {
            session_id: &session_id,
            plan: self.session.plan,
            tone_style: &self.tone_style,
            langs: &self.session.langs,
            items: &self.session.selected_items,
        };
        match fetch_preview(&self.api, &mut self.session.preview_cache, &query).await {
            Ok(res) => {
                let hit = res.is_cache_hit();
                self.session.generated = Some(res);
                self.renderer
                    .show_toast(if hit { "🧠 キャッシュ表示" } else { "✨ 生成完了" });
            }
            Err(e) => {
                tracing::warn!(error = %e, "generate_preview failed");
                self.renderer.show_toast("❌ 生成に失敗しました");
            }
        }

        self.renderer.show_loading(false);
    }

    /// 編集中なら破棄確認。続行してよければ true
    fn confirm_discard_edit(&mut self) -> bool {
        if !self.session.is_editing {
            return true;
        }
        if !self.surface_mut().confirm(DISCARD_EDIT_CONFIRM) {
            return false;
        }
        self.cancel_edit();
        true
    }

    async fn set_plan(&mut self, plan: Plan) {
        let previous = self.session.plan;
        if !self.confirm_discard_edit() {
            self.surface_mut().set_plan(previous);
            return;
        }

        self.session.plan = plan;
        self.renderer.render_plan(&self.session);
        self.renderer.show_toast(if plan.generates_text() {
            "✨ 69コース：生成します"
        } else {
            "🧪 39コース：空欄でOK"
        });

        if self.in_demo_review() && !self.session.is_complete() {
            self.ensure_generated().await;
            self.renderer.render_card(&mut self.session);
        }
    }

    fn set_lang(&mut self, lang: &str) {
        if !self.confirm_discard_edit() {
            self.renderer.render_lang_options(&self.session);
            return;
        }
        if !self.session.set_active_lang(lang) {
            return;
        }
        if self.in_demo_review() && !self.session.is_complete() {
            self.renderer.render_card(&mut self.session);
        }
    }

    fn go_back(&mut self) {
        if !self.in_demo_review() || self.session.is_complete() || self.session.current_index == 0
        {
            return;
        }
        if !self.confirm_discard_edit() {
            return;
        }
        self.session.current_index -= 1;
        self.renderer.render_card(&mut self.session);
        self.renderer.show_toast("⏪ 前の品目に戻りました");
    }

    fn enable_edit(&mut self) {
        if self.session.step != Step::Review
            || self.session.is_complete()
            || self.session.is_editing
        {
            return;
        }

        let draft = match self.session.mode() {
            UiMode::Demo => {
                // 39コースは編集不要
                if !self.session.plan.generates_text() {
                    return;
                }
                let Some(item) = self.session.current_item() else {
                    return;
                };
                let text = active_text(&self.session, &item.tmp_item_id);
                if !text.editable {
                    return;
                }
                EditorDraft::Description(text.body)
            }
            UiMode::Hearing => {
                let Some(item) = &self.session.hearing.current_item else {
                    return;
                };
                EditorDraft::Hearing(HearingEdit {
                    name: item
                        .name_ja_confirmed
                        .clone()
                        .or_else(|| item.name_ja_raw.clone())
                        .unwrap_or_default(),
                    price: item.price_val_confirmed.or(item.price_val).unwrap_or(0),
                    category: item
                        .category_confirmed
                        .clone()
                        .or_else(|| item.category_raw.clone())
                        .unwrap_or_default(),
                })
            }
        };

        self.session.is_editing = true;
        self.surface_mut().open_editor(&draft);
        self.renderer.show_toast("✏️ お気軽に修正してください");
    }

    fn cancel_edit(&mut self) {
        self.session.is_editing = false;
        self.surface_mut().close_editor();
    }

    /// 編集内容をローカルの生成結果へ反映（サーバには送らない）
    fn save_edit(&mut self, text: &str) {
        if !self.session.is_editing || self.session.mode() != UiMode::Demo {
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            self.surface_mut().alert("説明文を入力してください");
            return;
        }

        let Some(tmp_item_id) = self.session.current_item().map(|x| x.tmp_item_id.clone()) else {
            return;
        };
        let lang = self.session.active_lang.clone();
        if let Some(generated) = self.session.generated.as_mut() {
            if let Some(item) = generated.item_mut(&tmp_item_id) {
                apply_description_edit(item, &lang, text);
            }
            // 同じ条件に戻ったときキャッシュから編集前の文に戻らないように
            if let Some(key) = generated.cache.as_ref().map(|c| c.cache_key.clone()) {
                if let Some(item) = self.session.preview_cache.item_mut(&key, &tmp_item_id) {
                    apply_description_edit(item, &lang, text);
                }
            }
        }

        self.cancel_edit();
        self.renderer.render_card(&mut self.session);
        self.renderer.show_toast("💾 保存しました！");
    }

    async fn approve(&mut self) {
        if self.session.step != Step::Review || self.session.is_complete() {
            return;
        }
        if self.session.is_editing {
            self.surface_mut().alert("編集を保存してからOKを押してください");
            return;
        }

        match self.session.mode() {
            UiMode::Demo => {
                self.renderer.show_toast("✅ ありがとうございます！");
                self.session.current_index += 1;
                self.surface_mut().animate_card_exit().await;
                self.renderer.render_card(&mut self.session);
            }
            UiMode::Hearing => self.approve_hearing_item().await,
        }
    }

    async fn attach_item_image(&mut self, image: ImagePayload) {
        if !self.in_demo_review() {
            return;
        }
        let Some(tmp_item_id) = self.session.current_item().map(|x| x.tmp_item_id.clone()) else {
            return;
        };

        // ローカルが正。アップロード失敗は通知のみで巻き戻さない
        self.session
            .item_images
            .insert(tmp_item_id.clone(), image.to_data_url());
        self.renderer.render_card(&mut self.session);
        self.renderer.show_toast("📷 写真を選択しました");

        if let Err(e) = self.api.upload_item_image(&tmp_item_id, &image).await {
            tracing::warn!(error = %e, %tmp_item_id, "item image upload failed");
            self.renderer.show_toast("⚠️ 写真保存に失敗（デモは継続）");
        }
    }

    fn remove_item_image(&mut self) {
        if !self.in_demo_review() {
            return;
        }
        let Some(tmp_item_id) = self.session.current_item().map(|x| x.tmp_item_id.clone()) else {
            return;
        };
        if self.session.item_images.remove(&tmp_item_id).is_none() {
            return;
        }
        self.renderer.show_toast("🗑️ 写真を削除しました");
        self.renderer.render_card(&mut self.session);
    }

    fn open_image(&mut self) {
        let src = self
            .session
            .current_item()
            .and_then(|x| self.session.item_image(&x.tmp_item_id))
            .map(str::to_string);
        if let Some(src) = src {
            self.surface_mut().open_modal(&src);
        }
    }

    async fn submit(&mut self) {
        if self.session.mode() != UiMode::Demo
            || self.session.step != Step::Review
            || !self.session.is_complete()
        {
            return;
        }
        self.renderer.show_loading(true);

        let payload = CompletePayload {
            plan: self.session.plan.code(),
            selected_tmp_item_ids: self.session.selected_ids.clone(),
            item_images_count: self.session.item_images.len(),
        };
        match self.api.complete_demo(&payload).await {
            Ok(_) => self
                .surface_mut()
                .alert("確定しました。本登録URLを送付します"),
            Err(e) => {
                tracing::warn!(error = %e, "complete failed");
                self.surface_mut()
                    .alert("送信に失敗しました（デモは保存されている想定）");
            }
        }

        self.renderer.show_loading(false);
    }

    async fn load_next_hearing_item(&mut self) -> Result<()> {
        let res = self.api.next_hearing_item().await?;
        match res.next_item {
            Some(item) if !res.completed => {
                self.session.hearing.current_item = Some(item);
            }
            _ => {
                self.session.hearing.current_item = None;
                self.session.hearing.completed = true;
            }
        }
        self.renderer.render_card(&mut self.session);
        Ok(())
    }

    async fn approve_hearing_item(&mut self) {
        let Some(tmp_item_id) = self
            .session
            .hearing
            .current_item
            .as_ref()
            .map(|x| x.tmp_item_id.clone())
        else {
            return;
        };
        self.renderer.show_loading(true);

        let result = match self.api.approve_hearing_item(&tmp_item_id).await {
            Ok(_) => self.load_next_hearing_item().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.renderer.show_toast("✅ ありがとうございます！"),
            Err(e) => {
                tracing::warn!(error = %e, %tmp_item_id, "hearing approve failed");
                self.renderer.show_toast("❌ 送信に失敗しました");
            }
        }

        self.renderer.show_loading(false);
    }

    async fn save_hearing_edit(&mut self, edit: HearingEdit) {
        if !self.session.is_editing || self.session.mode() != UiMode::Hearing {
            return;
        }
        let Some(tmp_item_id) = self
            .session
            .hearing
            .current_item
            .as_ref()
            .map(|x| x.tmp_item_id.clone())
        else {
            return;
        };
        let edit = HearingEdit {
            name: edit.name.trim().to_string(),
            category: edit.category.trim().to_string(),
            ..edit
        };
        if edit.name.is_empty() {
            self.surface_mut().alert("品名を入力してください");
            return;
        }
        if edit.price < 0 {
            self.surface_mut().alert("価格を確認してください");
            return;
        }

        self.renderer.show_loading(true);
        match self.api.edit_hearing_item(&tmp_item_id, &edit).await {
            Ok(_) => {
                self.cancel_edit();
                match self.load_next_hearing_item().await {
                    Ok(()) => self.renderer.show_toast("💾 保存しました！"),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to load hearing item");
                        self.renderer.show_toast("❌ 読み込みに失敗しました");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, %tmp_item_id, "hearing edit failed");
                self.renderer.show_toast("❌ 送信に失敗しました");
            }
        }
        self.renderer.show_loading(false);
    }
}

/// 本文全体を編集しているので食べ方/ペアリングは本文側に含まれる
fn apply_description_edit(item: &mut PreviewItem, lang: &str, text: &str) {
    let content = item
        .langs
        .entry(lang.to_string())
        .or_insert(None)
        .get_or_insert_with(ItemContent::default);
    content.review_18s = text.to_string();
    content.how_to_eat = None;
    content.pairing = None;
}
