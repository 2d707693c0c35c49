//! ファイル選択の読み込み

use crate::dispatcher::ActionSender;
use menu_wizard_common::{Action, ImagePayload};
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader, HtmlInputElement};

/// 選んだ写真を data URL で読み込んでから Action として送る。戻り値はファイル名
pub fn send_selected_image(
    ev: &Event,
    actions: &ActionSender,
    to_action: fn(ImagePayload) -> Action,
) -> Option<String> {
    let file = take_file(ev)?;
    let name = file.name();
    let actions = actions.clone();
    read_data_url(file, move |data_url| match ImagePayload::from_data_url(&data_url) {
        Some(image) => actions.send(to_action(image)),
        None => tracing::warn!("unexpected data url from file reader"),
    });
    Some(name)
}

/// change イベントから最初のファイルを取り出し、入力欄はリセットする
pub fn take_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}

/// data URL として読み込む
pub fn read_data_url<F>(file: File, on_load: F)
where
    F: FnOnce(String) + 'static,
{
    let Ok(reader) = FileReader::new() else {
        tracing::warn!("FileReader unavailable");
        return;
    };

    let reader_clone = reader.clone();
    let mut on_load = Some(on_load);
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        match (data_url, on_load.take()) {
            (Some(data_url), Some(f)) => f(data_url),
            (None, _) => tracing::warn!("file read produced no data url"),
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        tracing::warn!(error = ?e, "read_as_data_url failed");
    }
}
