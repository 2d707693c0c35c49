//! 画面への描画
//!
//! ビューをシグナルへ書き込むだけ。DOM は components 側の `view!` が作る。

use crate::ui::UiState;
use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use menu_wizard_common::render::{HearingCardView, LangOption, ProgressView, SelectRow};
use menu_wizard_common::{CardView, EditorDraft, Plan, Step, Surface};

const TOAST_MS: u32 = 2200;
/// `.swipe-out` のトランジションと合わせる
const CARD_EXIT_MS: u32 = 250;

pub struct DomSurface {
    ui: UiState,
    toast_timer: Option<Timeout>,
}

impl DomSurface {
    pub fn new(ui: UiState) -> Self {
        Self {
            ui,
            toast_timer: None,
        }
    }
}

impl Surface for DomSurface {
    fn set_step(&mut self, step: Step) {
        self.ui.step.set(step);
    }

    fn set_select_list(&mut self, rows: &[SelectRow]) {
        self.ui.checked.set(
            rows.iter()
                .filter(|r| r.checked)
                .map(|r| r.tmp_item_id.clone())
                .collect(),
        );
        self.ui.rows.set(rows.to_vec());
    }

    fn set_select_count(&mut self, label: &str, confirm_enabled: bool) {
        self.ui.select_count.set(label.to_string());
        self.ui.confirm_enabled.set(confirm_enabled);
    }

    fn set_item_checked(&mut self, tmp_item_id: &str, checked: bool) {
        self.ui.checked.update(|ids| {
            if checked {
                ids.insert(tmp_item_id.to_string());
            } else {
                ids.remove(tmp_item_id);
            }
        });
    }

    fn set_lang_options(&mut self, options: &[LangOption], active: &str) {
        self.ui.langs.set(options.to_vec());
        self.ui.active_lang.set(active.to_string());
    }

    fn set_plan(&mut self, plan: Plan) {
        self.ui.plan.set(plan);
    }

    fn set_card(&mut self, card: &CardView) {
        self.ui.exiting.set(false);
        self.ui.complete.set(false);
        self.ui.card.set(Some(card.clone()));
    }

    fn set_hearing_card(&mut self, card: &HearingCardView) {
        self.ui.exiting.set(false);
        self.ui.complete.set(false);
        self.ui.hearing_card.set(Some(card.clone()));
    }

    fn set_progress(&mut self, progress: &ProgressView) {
        self.ui.progress.set(Some(progress.clone()));
    }

    async fn animate_card_exit(&mut self) {
        self.ui.exiting.set(true);
        TimeoutFuture::new(CARD_EXIT_MS).await;
    }

    fn open_editor(&mut self, draft: &EditorDraft) {
        match draft {
            EditorDraft::Description(text) => self.ui.edit_text.set(text.clone()),
            EditorDraft::Hearing(edit) => {
                self.ui.edit_name.set(edit.name.clone());
                self.ui.edit_price.set(edit.price.to_string());
                self.ui.edit_category.set(edit.category.clone());
            }
        }
        self.ui.editor.set(Some(draft.clone()));
    }

    fn close_editor(&mut self) {
        self.ui.editor.set(None);
    }

    fn show_complete(&mut self) {
        self.ui.exiting.set(false);
        self.ui.complete.set(true);
    }

    fn show_toast(&mut self, message: &str) {
        let toast = self.ui.toast;
        toast.set(Some(message.to_string()));
        // 前のタイマーは drop でキャンセルされる
        self.toast_timer = Some(Timeout::new(TOAST_MS, move || toast.set(None)));
    }

    fn show_loading(&mut self, on: bool) {
        self.ui.loading.set(on);
    }

    fn open_modal(&mut self, src: &str) {
        self.ui.modal.set(Some(src.to_string()));
    }

    fn close_modal(&mut self) {
        self.ui.modal.set(None);
    }

    fn alert(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
