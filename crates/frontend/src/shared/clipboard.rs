//! Clipboard access via the async Web Clipboard API.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No window, or `navigator.clipboard` missing (insecure origin, old browser).
    #[error("剪贴板接口不可用")]
    Unavailable,
    #[error("写入剪贴板被拒绝：{0}")]
    Rejected(String),
}

/// Write `text` to the system clipboard.
pub async fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let navigator = window.navigator();

    // web-sys assumes the property exists; on http:// origins it is undefined.
    let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false);
    if !present {
        return Err(ClipboardError::Unavailable);
    }

    JsFuture::from(navigator.clipboard().write_text(text))
        .await
        .map(|_| ())
        .map_err(|err| ClipboardError::Rejected(describe_js_error(&err)))
}

fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
