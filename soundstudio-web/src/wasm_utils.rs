//! WASM utilities for browser interop
//!
//! # Event Listener Cleanup Pattern
//!
//! A JavaScript event listener backed by a Rust `Closure` must keep the
//! closure alive for as long as it is attached. Rather than leaking it with
//! `closure.forget()`, [`EventListener`] owns the closure and detaches the
//! listener in `Drop`, tying the listener lifetime to Rust ownership:
//!
//! ```ignore
//! let listener = EventListener::new(&area, "dragover", callback);
//!
//! // Listener is removed when `listener` goes out of scope or is dropped
//! drop(listener);
//! ```

use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

/// An event listener on any `EventTarget` that removes itself when dropped.
pub struct EventListener {
    target: web_sys_x::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(web_sys_x::Event)>,
}

impl EventListener {
    /// Attaches `callback` to `target` for `event_name`.
    ///
    /// The listener is automatically removed when this struct is dropped.
    pub fn new(
        target: &web_sys_x::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(web_sys_x::Event) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(web_sys_x::Event)> = Closure::wrap(Box::new(callback));

        if let Err(e) = target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
        {
            tracing::error!(
                "Failed to attach {} listener: {}",
                event_name,
                describe_js_error(&e)
            );
        }

        Self {
            target: target.clone(),
            event_name,
            callback,
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Human-readable text for a thrown JS value (`Error.message`, a string, or
/// its JSON form).
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys_x::Error>() {
        return String::from(err.message());
    }
    js_sys_x::JSON::stringify(value)
        .ok()
        .and_then(|s| JsValue::from(s).as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Coerce a JS argument to text the way string interpolation would for the
/// values page scripts pass (strings, numbers, `Error`s).
pub fn js_to_text(value: &JsValue) -> String {
    if let Some(n) = value.as_f64() {
        return n.to_string();
    }
    describe_js_error(value)
}

/// Convert a JS value to JSON via `JSON.stringify`. Fails for values with no
/// JSON form (`undefined`, functions) or cyclic structures.
pub fn js_to_json(value: &JsValue) -> Result<serde_json::Value, String> {
    let text = js_to_json_text(value)?
        .ok_or_else(|| "value has no JSON representation".to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

/// `JSON.stringify` text, exactly as the engine wrote it. `Ok(None)` when the
/// value has no JSON form (`undefined`, functions, symbols).
pub fn js_to_json_text(value: &JsValue) -> Result<Option<String>, String> {
    let text = js_sys_x::JSON::stringify(value).map_err(|e| describe_js_error(&e))?;
    Ok(JsValue::from(text).as_string())
}

/// Drop trailing arguments a fixed-arity closure received but the caller never
/// passed, so `f(a, b)` forwards two values rather than eight.
pub fn trim_missing<T>(mut args: Vec<T>, missing: impl Fn(&T) -> bool) -> Vec<T> {
    while args.last().is_some_and(&missing) {
        args.pop();
    }
    args
}

/// Convert JSON back into a plain JS value via `JSON.parse`.
pub fn json_to_js(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys_x::JSON::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_missing_arguments_are_dropped() {
        let args = vec![Some(1), Some(2), None, None, None];
        assert_eq!(trim_missing(args, Option::is_none), vec![Some(1), Some(2)]);
    }

    #[test]
    fn interior_missing_arguments_are_kept() {
        let args = vec![Some(1), None, Some(3), None];
        assert_eq!(
            trim_missing(args, Option::is_none),
            vec![Some(1), None, Some(3)]
        );
    }

    #[test]
    fn call_without_arguments_forwards_nothing() {
        let args: Vec<Option<u8>> = vec![None; 8];
        assert!(trim_missing(args, Option::is_none).is_empty());
    }
}
