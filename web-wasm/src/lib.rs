//! Menu Wizard Web App (Leptos + WASM)

mod api;
mod app;
mod boot;
mod components;
mod dispatcher;
mod files;
mod logging;
mod surface;
mod ui;

use api::FetchTransport;
use app::App;
use leptos::prelude::*;
use menu_wizard_common::{Controller, Error, Session};
use surface::DomSurface;
use ui::UiState;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);

    let config = match boot::read_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "boot failed");
            let message = match e {
                Error::Config(msg) => msg,
                other => other.to_string(),
            };
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
            return;
        }
    };
    tracing::info!(session_id = %config.demo_session_id, mode = ?config.mode(), "boot");

    let ui = UiState::new(config.mode());
    let (actions, rx) = dispatcher::channel();

    let mut controller = Controller::new(Session::new(config), FetchTransport, DomSurface::new(ui));
    // カードを作り直したら前のカードの編集欄は閉じる
    controller
        .renderer_mut()
        .on_after_card_render(move |_: &Session| ui.reset_card_controls());

    leptos::mount::mount_to_body(move || view! { <App ui=ui actions=actions /> });

    dispatcher::run(controller, rx);
}
