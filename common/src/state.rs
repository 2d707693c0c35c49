//! セッション状態
//!
//! ウィザード全体で唯一の可変状態。起動時に一度だけ生成し、
//! Controller が参照を保持して各処理に渡す。ページ（プロセス）終了で破棄される。

use crate::cache::PreviewCache;
use crate::config::{DemoConfig, Plan, UiMode};
use crate::types::{HearingItem, MenuItem, PreviewResponse};
use std::collections::HashMap;

/// 抽出候補の上限
pub const MAX_EXTRACTED_ITEMS: usize = 10;
/// 選択する品目数
pub const REQUIRED_SELECTION: usize = 3;
/// 常に選べる基準言語
pub const BASE_LANG: &str = "ja";

/// ウィザードのステップ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    /// メニュー撮影
    #[default]
    Capture,
    /// 3品選択
    Select,
    /// カード確認
    Review,
}

impl Step {
    pub fn index(self) -> u8 {
        match self {
            Step::Capture => 0,
            Step::Select => 1,
            Step::Review => 2,
        }
    }
}

/// ヒアリングフローの状態
#[derive(Debug, Clone, Default)]
pub struct HearingState {
    pub current_item: Option<HearingItem>,
    pub completed: bool,
}

/// セッション状態
#[derive(Debug, Clone)]
pub struct Session {
    config: DemoConfig,
    pub step: Step,
    pub extracted_items: Vec<MenuItem>,
    pub selected_ids: Vec<String>,
    pub selected_items: Vec<MenuItem>,
    pub current_index: usize,
    pub plan: Plan,
    pub langs: Vec<String>,
    pub active_lang: String,
    /// tmp_item_id → data URL
    pub item_images: HashMap<String, String>,
    pub preview_cache: PreviewCache,
    pub generated: Option<PreviewResponse>,
    pub is_editing: bool,
    pub is_processing: bool,
    pub hearing: HearingState,
}

impl Session {
    /// 検証済みの設定からセッションを生成
    pub fn new(config: DemoConfig) -> Self {
        let langs = config
            .preset()
            .langs()
            .iter()
            .map(|l| l.to_string())
            .collect();
        let plan = config.plan();
        let step = match config.mode() {
            UiMode::Hearing => Step::Review,
            UiMode::Demo => Step::Capture,
        };

        Self {
            config,
            step,
            extracted_items: Vec::new(),
            selected_ids: Vec::new(),
            selected_items: Vec::new(),
            current_index: 0,
            plan,
            langs,
            active_lang: BASE_LANG.to_string(),
            item_images: HashMap::new(),
            preview_cache: PreviewCache::default(),
            generated: None,
            is_editing: false,
            is_processing: false,
            hearing: HearingState::default(),
        }
    }

    /// 読み取り専用の設定
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.config.demo_session_id
    }

    pub fn mode(&self) -> UiMode {
        self.config.mode()
    }

    /// 選択可能な言語（"ja" 固定 + プリセット）
    pub fn available_langs(&self) -> Vec<String> {
        std::iter::once(BASE_LANG.to_string())
            .chain(self.langs.iter().cloned())
            .collect()
    }

    /// 言語を切り替え。候補外なら false
    pub fn set_active_lang(&mut self, lang: &str) -> bool {
        if lang == BASE_LANG || self.langs.iter().any(|l| l == lang) {
            self.active_lang = lang.to_string();
            true
        } else {
            false
        }
    }

    /// 確認中の品目
    pub fn current_item(&self) -> Option<&MenuItem> {
        self.selected_items.get(self.current_index)
    }

    /// 全品目の確認が終わったか
    pub fn is_complete(&self) -> bool {
        match self.mode() {
            UiMode::Hearing => self.hearing.completed,
            UiMode::Demo => self.current_index >= self.selected_items.len(),
        }
    }

    pub fn selection_ready(&self) -> bool {
        self.selected_ids.len() == REQUIRED_SELECTION
    }

    /// 抽出結果を差し替え（上限10件）。選択はリセット
    pub fn replace_extracted(&mut self, mut items: Vec<MenuItem>) {
        items.truncate(MAX_EXTRACTED_ITEMS);
        self.extracted_items = items;
        self.selected_ids.clear();
    }

    /// 抽出順を保ったまま選択IDの品目を確定
    pub fn resolve_selected_items(&mut self) {
        self.selected_items = self
            .extracted_items
            .iter()
            .filter(|x| self.selected_ids.contains(&x.tmp_item_id))
            .cloned()
            .collect();
    }

    pub fn item_image(&self, tmp_item_id: &str) -> Option<&str> {
        self.item_images.get(tmp_item_id).map(String::as_str)
    }
}
