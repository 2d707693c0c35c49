//! おすすめ3品の選択画面

use crate::components::click;
use crate::dispatcher::ActionSender;
use crate::ui::UiState;
use leptos::prelude::*;
use menu_wizard_common::render::SelectRow;
use menu_wizard_common::{Action, Step};
use web_sys::Event;

#[component]
fn SelectRowItem(row: SelectRow, ui: UiState, actions: ActionSender) -> impl IntoView {
    let id = row.tmp_item_id.clone();
    let is_checked = {
        let id = id.clone();
        move || ui.checked.with(|ids| ids.contains(&id))
    };

    // 見た目はすぐ反映し、拒否されたら Surface が戻す
    let on_change = move |ev: Event| {
        let checked = event_target_checked(&ev);
        ui.checked.update(|ids| {
            if checked {
                ids.insert(id.clone());
            } else {
                ids.remove(&id);
            }
        });
        actions.send(Action::ToggleSelect {
            tmp_item_id: id.clone(),
            checked,
        });
    };

    view! {
        <label class="select-row">
            <div class="select-row-left">
                <div class="select-name">{row.name}</div>
                <div class="select-sub">{format!("{} {}", row.category, row.price)}</div>
            </div>
            <input type="checkbox" prop:checked=is_checked on:change=on_change />
        </label>
    }
}

#[component]
pub fn SelectScreen(ui: UiState, actions: ActionSender) -> impl IntoView {
    let row_actions = actions.clone();

    view! {
        <section class="screen" class:active=move || ui.step.get() == Step::Select>
            <p>"おすすめの3品を選んでください"</p>
            <div class="select-list">
                {move || {
                    ui.rows
                        .get()
                        .into_iter()
                        .map(|row| view! { <SelectRowItem row=row ui=ui actions=row_actions.clone() /> })
                        .collect_view()
                }}
            </div>
            <div class="select-footer">
                <span>{move || ui.select_count.get()}</span>
                <button
                    disabled=move || !ui.confirm_enabled.get()
                    on:click=click(&actions, Action::ConfirmSelect)
                >
                    "この3品で進む"
                </button>
            </div>
        </section>
    }
}
