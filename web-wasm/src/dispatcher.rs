//! 操作の直列化
//!
//! ブラウザのイベントは Action にしてチャネルへ送る。コントローラは1本のタスクが持ち、
//! 前の操作が終わるまで次の操作は取り出さない。

use crate::api::FetchTransport;
use crate::surface::DomSurface;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use menu_wizard_common::{Action, Controller};
use wasm_bindgen_futures::spawn_local;

pub type WebController = Controller<FetchTransport, DomSurface>;

/// コンポーネントから Action を送る口
#[derive(Clone)]
pub struct ActionSender(UnboundedSender<Action>);

impl ActionSender {
    pub fn send(&self, action: Action) {
        if let Err(e) = self.0.unbounded_send(action) {
            tracing::warn!(error = %e, "action dropped");
        }
    }
}

pub fn channel() -> (ActionSender, UnboundedReceiver<Action>) {
    let (tx, rx) = unbounded();
    (ActionSender(tx), rx)
}

/// 起動描画のあと、届いた順に Action を処理する
pub fn run(mut controller: WebController, mut actions: UnboundedReceiver<Action>) {
    spawn_local(async move {
        controller.start().await;
        while let Some(action) = actions.next().await {
            tracing::debug!(action = action.name(), "dispatch");
            controller.dispatch(action).await;
        }
        tracing::debug!("action channel closed");
    });
}
