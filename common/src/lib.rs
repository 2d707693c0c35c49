//! Menu Wizard Common Library
//!
//! メニュー撮影 → 3品選択 → カード確認 のウィザード本体。
//! CLIとWeb(WASM)で共有し、通信は `Transport`、描画は `Surface` に委ねる。

pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod state;
pub mod surface;
pub mod types;

pub use api::{ApiClient, Body, HttpRequest, Method, Transport};
pub use cache::{fetch_preview, fingerprint_items, PreviewCache, PreviewQuery};
pub use config::{DemoConfig, Plan, PreviewPreset, UiMode};
pub use controller::{Action, Controller};
pub use error::{Error, Result};
pub use render::{active_text, ActiveText, CardView, Renderer};
pub use state::{Session, Step};
pub use surface::{EditorDraft, Surface};
pub use types::{
    HearingActionResponse, HearingEdit, HearingItem, ImagePayload, MenuItem, PreviewResponse,
};
