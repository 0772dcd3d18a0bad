//! Browser Adapters
//!
//! `localStorage` behind the core storage trait, and CSS variable updates.

use review_state::{KeyValueStorage, ReviewError, ReviewResult};
use wasm_bindgen::{JsCast, JsValue};

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> ReviewResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| ReviewError::Storage("no window".to_string()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| ReviewError::Storage("localStorage unavailable".to_string()))
}

fn js_error(err: JsValue) -> ReviewError {
    ReviewError::Storage(format!("{:?}", err))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> ReviewResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> ReviewResult<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> ReviewResult<()> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}

/// Set `--highlight-color` on the document root
pub fn apply_highlight(color: &str) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(root) = root {
        if let Err(e) = root.style().set_property("--highlight-color", color) {
            log::warn!("[APP] Failed to apply highlight color: {:?}", e);
        }
    }
}

/// Whether keyboard focus is in a text-entry element
pub fn is_form_field(target: Option<web_sys::EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
    {
        return true;
    }
    target
        .dyn_ref::<web_sys::HtmlElement>()
        .map(|element| element.is_content_editable())
        .unwrap_or(false)
}

/// `window.confirm`, false when unavailable
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
