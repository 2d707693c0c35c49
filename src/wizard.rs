//! 対話式ウィザード
//!
//! 選択肢を dialoguer で聞き、結果を Action としてコントローラへ渡す。
//! 状態遷移の判断はすべてコントローラ側にあり、ここでは行わない。

use crate::error::{MenuWizardError, Result};
use crate::image::load_image;
use crate::terminal::TerminalSurface;
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};
use menu_wizard_common::{
    Action, Controller, EditorDraft, HearingEdit, ImagePayload, Plan, Step, Transport,
};
use std::path::PathBuf;

pub type TerminalController<T> = Controller<T, TerminalSurface>;

/// カード確認時の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewChoice {
    Approve,
    Edit,
    Back,
    AttachPhoto,
    RemovePhoto,
    Lang,
    TogglePlan,
    Quit,
}

impl ReviewChoice {
    fn label(self, plan: Plan) -> String {
        match self {
            ReviewChoice::Approve => "✅ OK（次へ）".into(),
            ReviewChoice::Edit => "✏️ 修正".into(),
            ReviewChoice::Back => "⏪ 戻る".into(),
            ReviewChoice::AttachPhoto => "📷 写真を添付".into(),
            ReviewChoice::RemovePhoto => "🗑️ 写真を削除".into(),
            ReviewChoice::Lang => "🌐 言語を切り替え".into(),
            ReviewChoice::TogglePlan => match plan {
                Plan::Basic => "💎 69コースに切り替え".into(),
                Plan::Generative => "🧪 39コースに切り替え".into(),
            },
            ReviewChoice::Quit => "🚪 終了".into(),
        }
    }
}

/// 撮影から完了・申込確定まで
pub async fn run_demo<T: Transport>(
    controller: &mut TerminalController<T>,
    image: ImagePayload,
    max_image_size: u32,
) -> Result<()> {
    controller.start().await;
    controller.dispatch(Action::Capture(image)).await;
    if controller.session().step != Step::Select {
        return Err(MenuWizardError::NoItems(
            "写真を撮り直して再実行してください".into(),
        ));
    }

    if !select_items(controller).await? {
        return Ok(());
    }
    if !review_items(controller, max_image_size).await? {
        return Ok(());
    }

    let submit = Confirm::new()
        .with_prompt("この内容で申込を確定しますか？")
        .default(true)
        .interact()?;
    if submit {
        controller.dispatch(Action::Submit).await;
    }
    Ok(())
}

/// 3品を選んで確定。中断したら false
async fn select_items<T: Transport>(controller: &mut TerminalController<T>) -> Result<bool> {
    loop {
        let session = controller.session();
        let labels: Vec<String> = session
            .extracted_items
            .iter()
            .map(|it| format!("{}  {} {}", it.name_ja, it.category(), it.price_raw()))
            .collect();
        let ids: Vec<String> = session
            .extracted_items
            .iter()
            .map(|it| it.tmp_item_id.clone())
            .collect();
        let defaults: Vec<bool> = ids
            .iter()
            .map(|id| session.selected_ids.contains(id))
            .collect();

        let chosen = MultiSelect::new()
            .with_prompt("3品を選んでください（スペースで選択、Enterで決定）")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        // 外す → 付ける の順で反映（4品目はコントローラが拒否する）
        for (i, id) in ids.iter().enumerate() {
            if defaults[i] && !chosen.contains(&i) {
                controller
                    .dispatch(Action::ToggleSelect {
                        tmp_item_id: id.clone(),
                        checked: false,
                    })
                    .await;
            }
        }
        for &i in &chosen {
            controller
                .dispatch(Action::ToggleSelect {
                    tmp_item_id: ids[i].clone(),
                    checked: true,
                })
                .await;
        }

        if !controller.session().selection_ready() {
            eprintln!("ちょうど3品を選んでください");
            continue;
        }

        controller.dispatch(Action::ConfirmSelect).await;
        if controller.session().step == Step::Review {
            return Ok(true);
        }

        let retry = Confirm::new()
            .with_prompt("もう一度確定しますか？")
            .default(true)
            .interact()?;
        if !retry {
            return Ok(false);
        }
    }
}

/// 1品ずつ確認。最後まで進んだら true
async fn review_items<T: Transport>(
    controller: &mut TerminalController<T>,
    max_image_size: u32,
) -> Result<bool> {
    while !controller.session().is_complete() {
        if controller.session().is_editing {
            edit_description(controller).await?;
            continue;
        }

        let session = controller.session();
        let has_image = session
            .current_item()
            .and_then(|it| session.item_image(&it.tmp_item_id))
            .is_some();
        let mut choices = vec![ReviewChoice::Approve];
        if session.plan.generates_text() {
            choices.push(ReviewChoice::Edit);
        }
        if session.current_index > 0 {
            choices.push(ReviewChoice::Back);
        }
        choices.push(ReviewChoice::AttachPhoto);
        if has_image {
            choices.push(ReviewChoice::RemovePhoto);
        }
        choices.extend([ReviewChoice::Lang, ReviewChoice::TogglePlan, ReviewChoice::Quit]);

        let plan = session.plan;
        let labels: Vec<String> = choices.iter().map(|c| c.label(plan)).collect();
        let picked = Select::new()
            .with_prompt("操作を選んでください")
            .items(&labels)
            .default(0)
            .interact()?;

        match choices[picked] {
            ReviewChoice::Approve => controller.dispatch(Action::Approve).await,
            ReviewChoice::Edit => controller.dispatch(Action::Reject).await,
            ReviewChoice::Back => controller.dispatch(Action::Back).await,
            ReviewChoice::AttachPhoto => {
                let path: String = Input::new().with_prompt("写真のパス").interact_text()?;
                match load_image(&PathBuf::from(path.trim()), max_image_size) {
                    Ok(image) => controller.dispatch(Action::AttachItemImage(image)).await,
                    Err(e) => eprintln!("⚠ {}", e),
                }
            }
            ReviewChoice::RemovePhoto => controller.dispatch(Action::RemoveItemImage).await,
            ReviewChoice::Lang => {
                let langs = controller.surface().langs().to_vec();
                let labels: Vec<&str> = langs.iter().map(|l| l.label.as_str()).collect();
                let current = langs
                    .iter()
                    .position(|l| l.code == controller.session().active_lang)
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("言語")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                controller
                    .dispatch(Action::SetLang(langs[picked].code.clone()))
                    .await;
            }
            ReviewChoice::TogglePlan => {
                let next = match plan {
                    Plan::Basic => Plan::Generative,
                    Plan::Generative => Plan::Basic,
                };
                controller.dispatch(Action::SetPlan(next)).await;
            }
            ReviewChoice::Quit => return Ok(false),
        }
    }
    Ok(true)
}

async fn edit_description<T: Transport>(controller: &mut TerminalController<T>) -> Result<()> {
    let Some(EditorDraft::Description(text)) = controller.surface().draft().cloned() else {
        controller.dispatch(Action::CancelEdit).await;
        return Ok(());
    };

    match Editor::new().edit(&text)? {
        Some(edited) => {
            controller.dispatch(Action::SaveEdit(edited)).await;
            if controller.session().is_editing && !ask_continue_editing()? {
                controller.dispatch(Action::CancelEdit).await;
            }
        }
        None => controller.dispatch(Action::CancelEdit).await,
    }
    Ok(())
}

fn ask_continue_editing() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("編集を続けますか？")
        .default(true)
        .interact()?)
}

/// ヒアリング（サーバ側の未確認品目を順に確認）
pub async fn run_hearing<T: Transport>(controller: &mut TerminalController<T>) -> Result<()> {
    controller.start().await;

    while !controller.session().is_complete() {
        if controller.session().hearing.current_item.is_none() {
            let retry = Confirm::new()
                .with_prompt("品目を読み込めませんでした。再読み込みしますか？")
                .default(true)
                .interact()?;
            if !retry {
                return Ok(());
            }
            controller.dispatch(Action::LoadNextHearingItem).await;
            continue;
        }

        if controller.session().is_editing {
            edit_hearing_item(controller).await?;
            continue;
        }

        let picked = Select::new()
            .with_prompt("操作を選んでください")
            .items(&["✅ OK（このまま確定）", "✏️ 修正", "🚪 終了"])
            .default(0)
            .interact()?;
        match picked {
            0 => controller.dispatch(Action::Approve).await,
            1 => controller.dispatch(Action::Reject).await,
            _ => return Ok(()),
        }
    }
    Ok(())
}

async fn edit_hearing_item<T: Transport>(controller: &mut TerminalController<T>) -> Result<()> {
    let Some(EditorDraft::Hearing(draft)) = controller.surface().draft().cloned() else {
        controller.dispatch(Action::CancelEdit).await;
        return Ok(());
    };

    let name: String = Input::new()
        .with_prompt("品名")
        .with_initial_text(draft.name)
        .allow_empty(true)
        .interact_text()?;
    let price: i64 = Input::new()
        .with_prompt("価格（円）")
        .default(draft.price)
        .interact_text()?;
    let category: String = Input::new()
        .with_prompt("カテゴリ")
        .with_initial_text(draft.category)
        .allow_empty(true)
        .interact_text()?;

    controller
        .dispatch(Action::SaveHearingEdit(HearingEdit {
            name,
            price,
            category,
        }))
        .await;
    if controller.session().is_editing && !ask_continue_editing()? {
        controller.dispatch(Action::CancelEdit).await;
    }
    Ok(())
}
