//! window.fetch による送信

use menu_wizard_common::{Body, Error, HttpRequest, Result, Transport};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_error(e: JsValue) -> Error {
    Error::Transport(
        e.as_string()
            .unwrap_or_else(|| format!("{:?}", e)),
    )
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value> {
        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(js_error)?;
        if let Some(content_type) = request.body.content_type() {
            headers.set("Content-Type", content_type).map_err(js_error)?;
        }
        opts.set_headers(&headers);

        match &request.body {
            Body::Empty => {}
            Body::Json(value) => {
                opts.set_body(&JsValue::from_str(&serde_json::to_string(value)?));
            }
            Body::Form(form) => opts.set_body(&JsValue::from_str(form)),
        }

        let req = Request::new_with_str_and_init(&request.url, &opts).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| Error::Transport("window がありません".into()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(Error::RequestFailed {
                path: request.path,
                status: resp.status(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
