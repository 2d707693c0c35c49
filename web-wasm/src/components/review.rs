//! 確認画面（言語・プラン・進捗・カード・操作ボタン・完了画面）

use crate::components::card::{DemoCard, HearingCard};
use crate::components::click;
use crate::dispatcher::ActionSender;
use crate::ui::UiState;
use leptos::prelude::*;
use menu_wizard_common::{Action, Plan, Step, UiMode};
use web_sys::Event;

#[component]
fn ReviewControls(ui: UiState, actions: ActionSender) -> impl IntoView {
    let on_lang = {
        let actions = actions.clone();
        move |ev: Event| actions.send(Action::SetLang(event_target_value(&ev)))
    };
    let on_plan = move |ev: Event| {
        if let Ok(plan) = event_target_value(&ev).parse::<Plan>() {
            actions.send(Action::SetPlan(plan));
        }
    };

    view! {
        <div class="review-controls">
            <select on:change=on_lang>
                {move || {
                    ui.langs
                        .get()
                        .into_iter()
                        .map(|o| {
                            let code = o.code.clone();
                            view! {
                                <option
                                    value=o.code
                                    prop:selected=move || ui.active_lang.with(|active| *active == code)
                                >
                                    {o.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            <label class="plan-option">
                <input
                    type="radio"
                    name="plan"
                    value="39"
                    prop:checked=move || ui.plan.get() == Plan::Basic
                    on:change=on_plan.clone()
                />
                "39コース"
            </label>
            <label class="plan-option">
                <input
                    type="radio"
                    name="plan"
                    value="69"
                    prop:checked=move || ui.plan.get() == Plan::Generative
                    on:change=on_plan
                />
                "69コース"
            </label>
        </div>
    }
}

#[component]
fn CompleteScreen(ui: UiState, actions: ActionSender) -> impl IntoView {
    // ヒアリングには申込がない
    let submit = (ui.mode == UiMode::Demo).then(|| {
        view! {
            <button class="submit-button" on:click=click(&actions, Action::Submit)>
                "この内容で申し込む"
            </button>
        }
    });

    view! {
        <div class="complete-screen">
            <div class="complete-icon">"🎉"</div>
            <p>"すべての品目の確認が終わりました"</p>
            {submit}
        </div>
    }
}

#[component]
fn ReviewActions(ui: UiState, actions: ActionSender) -> impl IntoView {
    let back_visible = move || ui.progress.with(|p| p.as_ref().is_some_and(|p| p.back_visible));
    let back_actions = actions.clone();

    view! {
        <div class="review-actions">
            <Show when=back_visible>
                <button class="back-button" on:click=click(&back_actions, Action::Back)>"⏪ 戻る"</button>
            </Show>
            <button class="ng-button" on:click=click(&actions, Action::Reject)>"✏️ 修正"</button>
            <button class="ok-button" on:click=click(&actions, Action::Approve)>"✅ OK"</button>
        </div>
    }
}

#[component]
pub fn ReviewScreen(ui: UiState, actions: ActionSender) -> impl IntoView {
    let controls_actions = actions.clone();
    let card_actions = actions.clone();
    let complete_actions = actions.clone();

    let card = move || match ui.mode {
        UiMode::Demo => ui
            .card
            .get()
            .map(|card| view! { <DemoCard card=card ui=ui actions=card_actions.clone() /> }.into_any()),
        UiMode::Hearing => ui
            .hearing_card
            .get()
            .map(|card| view! { <HearingCard card=card ui=ui actions=card_actions.clone() /> }.into_any()),
    };

    view! {
        <section class="screen" class:active=move || ui.step.get() == Step::Review>
            <Show when=move || ui.mode == UiMode::Demo>
                <ReviewControls ui=ui actions=controls_actions.clone() />
            </Show>
            <div class="progress">
                {move || {
                    ui.progress
                        .get()
                        .map(|p| {
                            view! {
                                <span>{p.label}</span>
                                <span class="encouragement">{p.encouragement}</span>
                            }
                        })
                }}
            </div>
            <Show
                when=move || !ui.complete.get()
                fallback=move || view! { <CompleteScreen ui=ui actions=complete_actions.clone() /> }
            >
                <div class="card-container" class:swipe-out=move || ui.exiting.get()>
                    {card.clone()}
                </div>
                {
                    let actions = actions.clone();
                    move || (!ui.is_editing()).then(|| view! { <ReviewActions ui=ui actions=actions.clone() /> })
                }
            </Show>
        </section>
    }
}
