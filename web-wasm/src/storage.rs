//! `window.localStorage` を使うストレージ

use inventory_common::{Error, KeyValueStorage, Result};
use wasm_bindgen::JsValue;

/// ブラウザのオリジン単位ストレージ
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

/// JS例外（QuotaExceededError等）を文字列化
fn js_error(context: &str, value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| js_sys::Reflect::get(&value, &JsValue::from_str("message")).ok()?.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Persistence(format!("{}: {}", context, message))
}

impl BrowserStorage {
    /// `localStorage` を取得（無効化されている環境ではエラー）
    pub fn local() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::Persistence("window is not available".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage", e))?
            .ok_or_else(|| Error::Persistence("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("getItem", e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("setItem", e))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("removeItem", e))
    }
}
