//! トースト・ローディング・画像モーダル

use crate::components::click;
use crate::dispatcher::ActionSender;
use leptos::prelude::*;
use menu_wizard_common::Action;

#[component]
pub fn Toast(toast: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <div class="toast" class:show=move || toast.with(Option::is_some)>
            {move || toast.get().unwrap_or_default()}
        </div>
    }
}

#[component]
pub fn LoadingOverlay(loading: RwSignal<bool>) -> impl IntoView {
    view! {
        <div class="loading-overlay" class:active=move || loading.get()>
            <div class="spinner"></div>
        </div>
    }
}

#[component]
pub fn ImageModal(modal: RwSignal<Option<String>>, actions: ActionSender) -> impl IntoView {
    view! {
        <div
            class="modal"
            class:active=move || modal.with(Option::is_some)
            on:click=click(&actions, Action::CloseModal)
        >
            <img src=move || modal.get().unwrap_or_default() alt="" />
        </div>
    }
}
