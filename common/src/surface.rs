//! 描画先の抽象
//!
//! ブラウザDOM・ターミナル・テスト用レコーダーが実装する。
//! Renderer が計算したビューを受け取って表示するだけで、状態は持たない。

use crate::config::Plan;
use crate::render::{CardView, HearingCardView, LangOption, ProgressView, SelectRow};
use crate::state::Step;
use crate::types::HearingEdit;

/// 編集欄に渡す下書き
#[derive(Debug, Clone, PartialEq)]
pub enum EditorDraft {
    /// 説明文（69コース）
    Description(String),
    /// 品名・価格・カテゴリ（ヒアリング）
    Hearing(HearingEdit),
}

#[allow(async_fn_in_trait)]
pub trait Surface {
    /// 表示するステップを切り替え
    fn set_step(&mut self, step: Step);

    fn set_select_list(&mut self, rows: &[SelectRow]);

    /// "n / 3" と確定ボタンの有効/無効
    fn set_select_count(&mut self, label: &str, confirm_enabled: bool);

    /// チェックボックス1件だけを書き戻す（選択拒否時の巻き戻し）
    fn set_item_checked(&mut self, tmp_item_id: &str, checked: bool);

    fn set_lang_options(&mut self, options: &[LangOption], active: &str);

    fn set_plan(&mut self, plan: Plan);

    fn set_card(&mut self, card: &CardView);

    fn set_hearing_card(&mut self, card: &HearingCardView);

    fn set_progress(&mut self, progress: &ProgressView);

    /// 承認時のカード退場演出。終わるまで次のカードは描かない
    async fn animate_card_exit(&mut self) {}

    fn open_editor(&mut self, draft: &EditorDraft);

    fn close_editor(&mut self);

    fn show_complete(&mut self);

    fn show_toast(&mut self, message: &str);

    fn show_loading(&mut self, on: bool);

    fn open_modal(&mut self, src: &str);

    fn close_modal(&mut self);

    /// ブロッキングな通知
    fn alert(&mut self, message: &str);

    /// 破棄確認などの同期的な確認。false なら中止
    fn confirm(&mut self, message: &str) -> bool;
}
