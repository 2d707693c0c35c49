//! 画面の状態（シグナル）
//!
//! DomSurface が書き込み、components が `view!` で描く。

use leptos::prelude::*;
use menu_wizard_common::render::{HearingCardView, LangOption, ProgressView, SelectRow};
use menu_wizard_common::{CardView, EditorDraft, Plan, Step, UiMode};
use std::collections::HashSet;

#[derive(Clone, Copy)]
pub struct UiState {
    pub mode: UiMode,
    pub step: RwSignal<Step>,
    pub rows: RwSignal<Vec<SelectRow>>,
    /// チェック中の品目（画面上の見た目）
    pub checked: RwSignal<HashSet<String>>,
    pub select_count: RwSignal<String>,
    pub confirm_enabled: RwSignal<bool>,
    pub langs: RwSignal<Vec<LangOption>>,
    pub active_lang: RwSignal<String>,
    pub plan: RwSignal<Plan>,
    pub card: RwSignal<Option<CardView>>,
    pub hearing_card: RwSignal<Option<HearingCardView>>,
    pub progress: RwSignal<Option<ProgressView>>,
    /// 承認時の退場アニメーション中
    pub exiting: RwSignal<bool>,
    pub editor: RwSignal<Option<EditorDraft>>,
    pub edit_text: RwSignal<String>,
    pub edit_name: RwSignal<String>,
    pub edit_price: RwSignal<String>,
    pub edit_category: RwSignal<String>,
    pub complete: RwSignal<bool>,
    pub toast: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub modal: RwSignal<Option<String>>,
}

impl UiState {
    pub fn new(mode: UiMode) -> Self {
        Self {
            mode,
            step: RwSignal::new(Step::Capture),
            rows: RwSignal::new(Vec::new()),
            checked: RwSignal::new(HashSet::new()),
            select_count: RwSignal::new(String::new()),
            confirm_enabled: RwSignal::new(false),
            langs: RwSignal::new(Vec::new()),
            active_lang: RwSignal::new(String::new()),
            plan: RwSignal::new(Plan::default()),
            card: RwSignal::new(None),
            hearing_card: RwSignal::new(None),
            progress: RwSignal::new(None),
            exiting: RwSignal::new(false),
            editor: RwSignal::new(None),
            edit_text: RwSignal::new(String::new()),
            edit_name: RwSignal::new(String::new()),
            edit_price: RwSignal::new(String::new()),
            edit_category: RwSignal::new(String::new()),
            complete: RwSignal::new(false),
            toast: RwSignal::new(None),
            loading: RwSignal::new(false),
            modal: RwSignal::new(None),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.with(Option::is_some)
    }

    /// カードを描き直した後の編集欄リセット
    pub fn reset_card_controls(&self) {
        self.editor.set(None);
        self.edit_text.set(String::new());
        self.edit_name.set(String::new());
        self.edit_price.set(String::new());
        self.edit_category.set(String::new());
    }
}
