//! `window.localStorage` as a [`KeyValueBackend`]

use soundstudio_common::{BackendError, KeyValueBackend};
use wasm_bindgen_x::JsValue;

use crate::wasm_utils::describe_js_error;

/// Looks the storage object up on every call, since access can be revoked
/// (private browsing, sandboxed frames) while the page is open.
pub struct LocalStorageBackend {
    window: web_sys_x::Window,
}

impl LocalStorageBackend {
    pub fn new(window: web_sys_x::Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<web_sys_x::Storage, BackendError> {
        self.window
            .local_storage()
            .map_err(|e| BackendError::Unavailable(describe_js_error(&e)))?
            .ok_or_else(|| BackendError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn is_quota_error(e: &JsValue) -> bool {
    js_sys_x::Reflect::get(e, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .is_some_and(|name| name == "QuotaExceededError" || name == "NS_ERROR_DOM_QUOTA_REACHED")
}

impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| BackendError::Unavailable(describe_js_error(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            if is_quota_error(&e) {
                BackendError::QuotaExceeded {
                    key: key.to_string(),
                }
            } else {
                BackendError::Unavailable(describe_js_error(&e))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), BackendError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| BackendError::Unavailable(describe_js_error(&e)))
    }
}
