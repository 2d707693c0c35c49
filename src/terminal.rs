//! ターミナル描画
//!
//! Surface をターミナル出力で実装する。確認ダイアログは dialoguer、
//! ローディングは indicatif のスピナー。

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use menu_wizard_common::render::{HearingCardView, LangOption, ProgressView, SelectRow};
use menu_wizard_common::{CardView, EditorDraft, Plan, Step, Surface};
use std::time::Duration;

#[derive(Default)]
pub struct TerminalSurface {
    spinner: Option<ProgressBar>,
    rows: Vec<SelectRow>,
    langs: Vec<LangOption>,
    draft: Option<EditorDraft>,
    complete: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択リスト（最後に描画した内容）
    pub fn rows(&self) -> &[SelectRow] {
        &self.rows
    }

    pub fn langs(&self) -> &[LangOption] {
        &self.langs
    }

    /// 編集中の下書き
    pub fn draft(&self) -> Option<&EditorDraft> {
        self.draft.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn println(&self, line: &str) {
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => println!("{}", line),
        }
    }
}

impl Surface for TerminalSurface {
    fn set_step(&mut self, step: Step) {
        let title = match step {
            Step::Capture => "[1/3] メニューを撮影",
            Step::Select => "[2/3] 3品を選択",
            Step::Review => "[3/3] 1品ずつ確認",
        };
        self.println(&format!("\n{}", title));
    }

    fn set_select_list(&mut self, rows: &[SelectRow]) {
        self.rows = rows.to_vec();
        for (i, row) in rows.iter().enumerate() {
            self.println(&format!(
                "  {:>2}. [{}] {}  {} {}",
                i + 1,
                if row.checked { "x" } else { " " },
                row.name,
                row.category,
                row.price
            ));
        }
    }

    fn set_select_count(&mut self, label: &str, _confirm_enabled: bool) {
        self.println(&format!("  選択中: {}", label));
    }

    fn set_item_checked(&mut self, tmp_item_id: &str, checked: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.tmp_item_id == tmp_item_id) {
            row.checked = checked;
        }
    }

    fn set_lang_options(&mut self, options: &[LangOption], _active: &str) {
        self.langs = options.to_vec();
    }

    fn set_plan(&mut self, plan: Plan) {
        tracing::debug!(plan = plan.code(), "plan changed");
    }

    fn set_card(&mut self, card: &CardView) {
        self.println("────────────────────────────");
        self.println(&format!("🍽  {}", card.name));
        self.println(&format!("   {}  {}", card.price, card.category));
        if card.image.is_some() {
            self.println("   📷 写真あり");
        }
        self.println("");
        for line in card.text.body.lines() {
            self.println(&format!("   {}", line));
        }
        self.println("────────────────────────────");
    }

    fn set_hearing_card(&mut self, card: &HearingCardView) {
        self.println("────────────────────────────");
        if card.recommended {
            self.println("⭐ おすすめ");
        }
        self.println(&format!("🍽  {}", card.name));
        self.println(&format!("   {}  {}", card.price, card.category));
        self.println("────────────────────────────");
    }

    fn set_progress(&mut self, progress: &ProgressView) {
        self.println(&format!("{}  {}", progress.label, progress.encouragement));
    }

    fn open_editor(&mut self, draft: &EditorDraft) {
        self.draft = Some(draft.clone());
    }

    fn close_editor(&mut self) {
        self.draft = None;
    }

    fn show_complete(&mut self) {
        self.complete = true;
        self.println("\n🏁 すべての品目の確認が終わりました");
    }

    fn show_toast(&mut self, message: &str) {
        self.println(message);
    }

    fn show_loading(&mut self, on: bool) {
        if on {
            if self.spinner.is_none() {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message("通信中...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(spinner);
            }
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn open_modal(&mut self, src: &str) {
        // data URL はそのまま表示できないのでサイズだけ
        self.println(&format!("📷 添付写真 ({} bytes base64)", src.len()));
    }

    fn close_modal(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.show_loading(false);
        eprintln!("⚠ {}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.show_loading(false);
        confirm_answer(Confirm::new().with_prompt(message).default(false).interact())
    }
}

/// 入力に失敗した確認は「いいえ」として扱う
fn confirm_answer(result: dialoguer::Result<bool>) -> bool {
    match result {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %e, "confirm prompt failed");
            false
        }
    }
}
