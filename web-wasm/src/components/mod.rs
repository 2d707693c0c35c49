pub mod capture;
pub mod card;
pub mod header;
pub mod overlays;
pub mod review;
pub mod select_list;

use crate::dispatcher::ActionSender;
use menu_wizard_common::Action;
use web_sys::MouseEvent;

/// クリックで固定の Action を送る
pub fn click(actions: &ActionSender, action: Action) -> impl Fn(MouseEvent) + Clone + Send + Sync + 'static {
    let actions = actions.clone();
    move |_| actions.send(action.clone())
}
