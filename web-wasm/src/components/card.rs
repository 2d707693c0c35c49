//! 確認カード
//!
//! 文字列はすべてテキストノードとして描くので、品名に含まれるタグはそのまま表示される。

use crate::components::click;
use crate::dispatcher::ActionSender;
use crate::files::send_selected_image;
use crate::ui::UiState;
use leptos::prelude::*;
use menu_wizard_common::render::HearingCardView;
use menu_wizard_common::{Action, CardView, HearingEdit};
use web_sys::Event;

const ITEM_FILE_INPUT: &str = "itemFileInput";

/// 改行を <br> にして描く
fn multiline(text: String) -> impl IntoView {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.to_string();
            view! {
                {(i > 0).then(|| view! { <br /> })}
                {line}
            }
        })
        .collect_view()
}

/// 価格欄（空欄は0円）
fn parse_price(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

#[component]
fn ItemPhoto(image: Option<String>, name: String, actions: ActionSender) -> impl IntoView {
    let on_file = {
        let actions = actions.clone();
        move |ev: Event| {
            send_selected_image(&ev, &actions, Action::AttachItemImage);
        }
    };

    let preview = match image {
        Some(src) => view! {
            <div class="image-preview-container has-image">
                <img src=src class="image-preview" alt=name on:click=click(&actions, Action::OpenImage) />
                <div class="image-actions">
                    <label class="image-action-btn" for=ITEM_FILE_INPUT>"📷 変更"</label>
                    <button class="image-action-btn" on:click=click(&actions, Action::RemoveItemImage)>
                        "🗑️ 削除"
                    </button>
                </div>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="image-upload-buttons">
                <label class="upload-button" for=ITEM_FILE_INPUT>
                    <span class="icon">"📷"</span>
                    <span class="label">"写真を選択"</span>
                </label>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="image-upload-section">
            <div class="image-upload-label">"料理の写真"</div>
            <input type="file" id=ITEM_FILE_INPUT accept="image/*" style="display:none" on:change=on_file />
            {preview}
        </div>
    }
}

#[component]
fn DescriptionEditor(ui: UiState, actions: ActionSender) -> impl IntoView {
    let on_save = {
        let actions = actions.clone();
        move |_| actions.send(Action::SaveEdit(ui.edit_text.get_untracked()))
    };

    view! {
        <div class="edit-area active">
            <textarea
                prop:value=ui.edit_text.get_untracked()
                on:input=move |ev| ui.edit_text.set(event_target_value(&ev))
            ></textarea>
            <div class="edit-buttons">
                <button class="edit-button cancel-button" on:click=click(&actions, Action::CancelEdit)>
                    "キャンセル"
                </button>
                <button class="edit-button save-button" on:click=on_save>"保存"</button>
            </div>
        </div>
    }
}

#[component]
pub fn DemoCard(card: CardView, ui: UiState, actions: ActionSender) -> impl IntoView {
    let CardView {
        name,
        price,
        category,
        image,
        text,
        ..
    } = card;
    let body = text.body;
    let hint = if text.editable { "タップして編集" } else { "" };
    let photo_name = name.clone();
    let editor_actions = actions.clone();
    let photo_actions = actions.clone();

    view! {
        <div class="card">
            <div class="dish-name">{name}</div>
            <div class="dish-meta">
                <div class="dish-price">{price}</div>
                <div class="dish-cat">{category}</div>
            </div>
            <ItemPhoto image=image name=photo_name actions=photo_actions />
            <Show
                when=move || !ui.is_editing()
                fallback=move || view! { <DescriptionEditor ui=ui actions=editor_actions.clone() /> }
            >
                <div class="dish-description" on:click=click(&actions, Action::Reject)>
                    {multiline(body.clone())}
                </div>
                <div class="edit-hint" on:click=click(&actions, Action::Reject)>{hint}</div>
            </Show>
        </div>
    }
}

#[component]
fn HearingEditor(ui: UiState, actions: ActionSender) -> impl IntoView {
    let on_save = {
        let actions = actions.clone();
        move |_| {
            let Some(price) = parse_price(&ui.edit_price.get_untracked()) else {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message("価格は数字で入力してください");
                }
                return;
            };
            actions.send(Action::SaveHearingEdit(HearingEdit {
                name: ui.edit_name.get_untracked(),
                price,
                category: ui.edit_category.get_untracked(),
            }));
        }
    };

    view! {
        <div class="edit-area active">
            <input
                type="text"
                prop:value=ui.edit_name.get_untracked()
                on:input=move |ev| ui.edit_name.set(event_target_value(&ev))
            />
            <input
                type="number"
                prop:value=ui.edit_price.get_untracked()
                on:input=move |ev| ui.edit_price.set(event_target_value(&ev))
            />
            <input
                type="text"
                prop:value=ui.edit_category.get_untracked()
                on:input=move |ev| ui.edit_category.set(event_target_value(&ev))
            />
            <div class="edit-buttons">
                <button class="edit-button cancel-button" on:click=click(&actions, Action::CancelEdit)>
                    "キャンセル"
                </button>
                <button class="edit-button save-button" on:click=on_save>"保存"</button>
            </div>
        </div>
    }
}

#[component]
pub fn HearingCard(card: HearingCardView, ui: UiState, actions: ActionSender) -> impl IntoView {
    view! {
        <div class="card hearing-card">
            {card.recommended.then(|| view! { <div class="recommended-badge">"⭐ おすすめ"</div> })}
            <div class="dish-name">{card.name}</div>
            <div class="dish-meta">
                <div class="dish-price">{card.price}</div>
                <div class="dish-cat">{card.category}</div>
            </div>
            <Show when=move || ui.is_editing()>
                <HearingEditor ui=ui actions=actions.clone() />
            </Show>
        </div>
    }
}
