//! ヘッダーとステップ表示

use leptos::prelude::*;
use menu_wizard_common::Step;

#[component]
fn StepDot(step: RwSignal<Step>, target: Step, label: &'static str) -> impl IntoView {
    view! {
        <span
            class="step-dot"
            class:active=move || step.get() == target
            class:done=move || step.get().index() < target.index()
        >
            {label}
        </span>
    }
}

#[component]
pub fn Header(step: RwSignal<Step>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"メニュー登録デモ"</h1>
            <div class="step-indicator">
                <StepDot step=step target=Step::Capture label="1 撮影" />
                <StepDot step=step target=Step::Select label="2 選択" />
                <StepDot step=step target=Step::Review label="3 確認" />
            </div>
        </header>
    }
}
