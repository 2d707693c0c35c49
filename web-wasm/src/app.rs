//! メインアプリケーションコンポーネント
//!
//! 表示内容は UiState のシグナルから作る。状態の本体は Controller 側。

use crate::components::{
    capture::CaptureScreen,
    header::Header,
    overlays::{ImageModal, LoadingOverlay, Toast},
    review::ReviewScreen,
    select_list::SelectScreen,
};
use crate::dispatcher::ActionSender;
use crate::ui::UiState;
use leptos::prelude::*;

#[component]
pub fn App(ui: UiState, actions: ActionSender) -> impl IntoView {
    view! {
        <div class="container">
            <Header step=ui.step />
            <CaptureScreen ui=ui actions=actions.clone() />
            <SelectScreen ui=ui actions=actions.clone() />
            <ReviewScreen ui=ui actions=actions.clone() />
            <Toast toast=ui.toast />
            <LoadingOverlay loading=ui.loading />
            <ImageModal modal=ui.modal actions=actions />
        </div>
    }
}
