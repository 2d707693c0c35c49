//! 起動設定の読み込み
//!
//! ホストページが `window.__MENU_WIZARD__` に設定オブジェクトを置いておく。

use menu_wizard_common::{DemoConfig, Error, Result};
use wasm_bindgen::JsValue;

pub const CONFIG_GLOBAL: &str = "__MENU_WIZARD__";

/// グローバル設定を読み、必須項目を検証する
pub fn read_config() -> Result<DemoConfig> {
    let window = web_sys::window().ok_or_else(|| Error::Config("window がありません".into()))?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|_| Error::Config(format!("{} を読めません", CONFIG_GLOBAL)))?;
    parse_config(value)
}

fn parse_config(value: JsValue) -> Result<DemoConfig> {
    if value.is_undefined() || value.is_null() {
        return DemoConfig::default().validate();
    }
    let config: DemoConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| Error::Config(e.to_string()))?;
    config.validate()
}
