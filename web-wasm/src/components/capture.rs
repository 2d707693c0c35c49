//! 撮影画面

use crate::dispatcher::ActionSender;
use crate::files::send_selected_image;
use crate::ui::UiState;
use leptos::prelude::*;
use menu_wizard_common::{Action, Step};
use web_sys::Event;

#[component]
pub fn CaptureScreen(ui: UiState, actions: ActionSender) -> impl IntoView {
    let (file_name, set_file_name) = signal(String::new());

    let on_file = move |ev: Event| {
        if let Some(name) = send_selected_image(&ev, &actions, Action::Capture) {
            set_file_name.set(name);
        }
    };

    view! {
        <section class="screen" class:active=move || ui.step.get() == Step::Capture>
            <p>"メニュー表を撮影してください"</p>
            <label class="capture-button" for="menuFileInput">"📷 撮影する"</label>
            <input
                type="file"
                id="menuFileInput"
                accept="image/*"
                capture="environment"
                style="display:none"
                on:change=on_file
            />
            <Show when=move || !file_name.get().is_empty()>
                <p class="text-muted">{move || file_name.get()}</p>
            </Show>
        </section>
    }
}
