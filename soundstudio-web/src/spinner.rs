//! Loading spinner visibility

use tracing::warn;

use crate::wasm_utils::describe_js_error;

/// Bootstrap utility class that hides an element
const HIDDEN_CLASS: &str = "d-none";

pub fn show_loading_spinner(spinner: &web_sys_x::Element) {
    if let Err(e) = spinner.class_list().remove_1(HIDDEN_CLASS) {
        warn!("Failed to show spinner: {}", describe_js_error(&e));
    }
}

pub fn hide_loading_spinner(spinner: &web_sys_x::Element) {
    if let Err(e) = spinner.class_list().add_1(HIDDEN_CLASS) {
        warn!("Failed to hide spinner: {}", describe_js_error(&e));
    }
}
