//! `window.soundstudio`: the helpers as page scripts see them
//!
//! Every entry is a Rust closure handed to JS with `into_js_value`, so it
//! lives as long as the namespace object. Validation errors are thrown as
//! `Error`s; storage, banner and chart failures are logged and absorbed.

use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use soundstudio_common::{
    create_visualization, format_duration, format_file_size, AudioValidator, Debouncer,
    JsonStorage, Notifier, StudioConfig,
};
use tracing::{debug, error};
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

use crate::banners::DomBannerHost;
use crate::local_storage::LocalStorageBackend;
use crate::plotly::PlotlyBackend;
use crate::spinner::{hide_loading_spinner, show_loading_spinner};
use crate::timers::BrowserScheduler;
use crate::upload::{file_from_js, handle_file_upload, selected_files};
use crate::wasm_utils::{describe_js_error, js_to_json_text, js_to_text, json_to_js, trim_missing};

pub const NAMESPACE: &str = "soundstudio";

/// Shared state behind every namespace function
pub struct Studio {
    config: StudioConfig,
    scheduler: Rc<BrowserScheduler>,
    notifier: Notifier<DomBannerHost>,
    storage: JsonStorage<LocalStorageBackend>,
    plotter: PlotlyBackend,
    validator: AudioValidator,
}

impl Studio {
    pub fn new(window: web_sys_x::Window, config: StudioConfig) -> Result<Self, JsValue> {
        let document = window.document().ok_or("no document")?;
        let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
        let notifier = Notifier::new(
            DomBannerHost::new(document, &config.notifications),
            scheduler.clone(),
            config.notifications.clone(),
        );
        Ok(Self {
            scheduler,
            notifier,
            storage: JsonStorage::new(LocalStorageBackend::new(window.clone())),
            plotter: PlotlyBackend::new(window),
            validator: AudioValidator::new(config.validation.clone()),
            config,
        })
    }
}

fn set(target: &js_sys_x::Object, name: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys_x::Reflect::set(target, &name.into(), value)?;
    Ok(())
}

fn type_error(message: &str) -> JsValue {
    js_sys_x::TypeError::new(message).into()
}

/// Build the namespace object and assign it to `window.soundstudio`.
pub fn install(window: &web_sys_x::Window, studio: Rc<Studio>) -> Result<(), JsValue> {
    let ns = js_sys_x::Object::new();

    set(&ns, "handleFileUpload", &handle_file_upload_fn(&studio))?;
    set(&ns, "showLoadingSpinner", &spinner_fn(true))?;
    set(&ns, "hideLoadingSpinner", &spinner_fn(false))?;
    set(&ns, "showError", &banner_fn(&studio, true))?;
    set(&ns, "showSuccess", &banner_fn(&studio, false))?;
    set(&ns, "createVisualization", &visualization_fn(&studio))?;
    set(&ns, "formatDuration", &format_duration_fn())?;
    set(&ns, "formatFileSize", &format_file_size_fn())?;
    set(&ns, "validateAudioFile", &validate_fn(&studio))?;
    set(&ns, "debounce", &debounce_fn(&studio))?;
    set(&ns, "storage", &storage_object(&studio)?)?;

    js_sys_x::Reflect::set(window, &NAMESPACE.into(), &ns)?;
    debug!("Installed window.{}", NAMESPACE);
    Ok(())
}

/// `handleFileUpload(uploadArea, fileInput, onFileSelect)`; returns a
/// function that detaches the listeners.
fn handle_file_upload_fn(studio: &Rc<Studio>) -> JsValue {
    let studio = studio.clone();
    Closure::wrap(Box::new(
        move |area: JsValue, input: JsValue, callback: JsValue| -> Result<JsValue, JsValue> {
            let area = area
                .dyn_into::<web_sys_x::HtmlElement>()
                .map_err(|_| type_error("handleFileUpload: uploadArea must be an element"))?;
            let input = input
                .dyn_into::<web_sys_x::HtmlInputElement>()
                .map_err(|_| type_error("handleFileUpload: fileInput must be an <input>"))?;
            let callback = callback
                .dyn_into::<js_sys_x::Function>()
                .map_err(|_| type_error("handleFileUpload: onFileSelect must be a function"))?;

            let listeners = handle_file_upload(
                area,
                input,
                studio.config.upload.clone(),
                move |files: web_sys_x::FileList| {
                    debug!("Files selected: {:?}", selected_files(&files));
                    if let Err(e) = callback.call1(&JsValue::NULL, &files) {
                        error!("onFileSelect threw: {}", describe_js_error(&e));
                    }
                },
            );
            Ok(Closure::<dyn FnMut()>::once(move || drop(listeners)).into_js_value())
        },
    )
        as Box<dyn Fn(JsValue, JsValue, JsValue) -> Result<JsValue, JsValue>>)
    .into_js_value()
}

fn spinner_fn(show: bool) -> JsValue {
    Closure::wrap(Box::new(move |spinner: JsValue| {
        match spinner.dyn_ref::<web_sys_x::Element>() {
            Some(el) if show => show_loading_spinner(el),
            Some(el) => hide_loading_spinner(el),
            None => error!("Loading spinner is not an element"),
        }
    }) as Box<dyn Fn(JsValue)>)
    .into_js_value()
}

fn banner_fn(studio: &Rc<Studio>, is_error: bool) -> JsValue {
    let studio = studio.clone();
    Closure::wrap(Box::new(move |message: JsValue| {
        let message = js_to_text(&message);
        let shown = if is_error {
            studio.notifier.show_error(&message)
        } else {
            studio.notifier.show_success(&message)
        };
        if let Err(e) = shown {
            error!("Could not show banner: {}", e);
        }
    }) as Box<dyn Fn(JsValue)>)
    .into_js_value()
}

fn visualization_fn(studio: &Rc<Studio>) -> JsValue {
    let studio = studio.clone();
    Closure::wrap(Box::new(
        move |container_id: JsValue, data: JsValue, layout: JsValue| {
            let container_id = js_to_text(&container_id);
            if let Err(e) = create_visualization(
                &studio.plotter,
                &container_id,
                &data,
                &layout,
                &studio.config.chart,
            ) {
                error!("createVisualization('{}') failed: {}", container_id, e);
            }
        },
    ) as Box<dyn Fn(JsValue, JsValue, JsValue)>)
    .into_js_value()
}

fn format_duration_fn() -> JsValue {
    Closure::wrap(Box::new(|seconds: JsValue| {
        JsValue::from_str(&format_duration(seconds.as_f64().unwrap_or(0.0)))
    }) as Box<dyn Fn(JsValue) -> JsValue>)
    .into_js_value()
}

fn format_file_size_fn() -> JsValue {
    Closure::wrap(Box::new(|bytes: JsValue| {
        let bytes = bytes
            .as_f64()
            .filter(|b| b.is_finite() && *b > 0.0)
            .map(|b| b as u64)
            .unwrap_or(0);
        JsValue::from_str(&format_file_size(bytes))
    }) as Box<dyn Fn(JsValue) -> JsValue>)
    .into_js_value()
}

/// `validateAudioFile(file)`: `true`, or throws an `Error` with a message
/// suitable for `showError`.
fn validate_fn(studio: &Rc<Studio>) -> JsValue {
    let studio = studio.clone();
    Closure::wrap(Box::new(move |file: JsValue| -> Result<JsValue, JsValue> {
        let file = file_from_js(&file);
        studio
            .validator
            .validate(&file)
            .map(|()| JsValue::TRUE)
            .map_err(|e| js_sys_x::Error::new(&e.to_string()).into())
    }) as Box<dyn Fn(JsValue) -> Result<JsValue, JsValue>>)
    .into_js_value()
}

/// `debounce(func, wait)`: returns a variadic JS function forwarding its
/// arguments to a [`Debouncer`].
fn debounce_fn(studio: &Rc<Studio>) -> JsValue {
    let studio = studio.clone();
    Closure::wrap(Box::new(
        move |func: JsValue, wait: JsValue| -> Result<JsValue, JsValue> {
            let func = func
                .dyn_into::<js_sys_x::Function>()
                .map_err(|_| type_error("debounce: func must be a function"))?;
            let wait_ms = wait
                .as_f64()
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(0.0);

            let debouncer = Debouncer::new(
                studio.scheduler.clone(),
                Duration::from_millis(wait_ms as u64),
                move |args: js_sys_x::Array| {
                    if let Err(e) = func.apply(&JsValue::NULL, &args) {
                        error!("Debounced function threw: {}", describe_js_error(&e));
                    }
                },
            );
            // Closures have fixed arity: forward up to eight arguments.
            let forward = Closure::wrap(Box::new(
                move |a: JsValue,
                      b: JsValue,
                      c: JsValue,
                      d: JsValue,
                      e: JsValue,
                      f: JsValue,
                      g: JsValue,
                      h: JsValue| {
                    let args = trim_missing(vec![a, b, c, d, e, f, g, h], JsValue::is_undefined);
                    debouncer.call(args.into_iter().collect::<js_sys_x::Array>())
                },
            )
                as Box<dyn Fn(JsValue, JsValue, JsValue, JsValue, JsValue, JsValue, JsValue, JsValue)>)
            .into_js_value();
            Ok(forward)
        },
    ) as Box<dyn Fn(JsValue, JsValue) -> Result<JsValue, JsValue>>)
    .into_js_value()
}

/// `storage.set/get/remove` over `localStorage`, JSON-encoded.
fn storage_object(studio: &Rc<Studio>) -> Result<JsValue, JsValue> {
    let storage = js_sys_x::Object::new();

    let s = studio.clone();
    let set_fn = Closure::wrap(Box::new(move |key: JsValue, value: JsValue| {
        let key = js_to_text(&key);
        match js_to_json_text(&value) {
            Ok(text) => {
                s.storage.store_encoded(&key, text.as_deref());
            }
            Err(e) => error!("Error saving to localStorage: {}", e),
        }
    }) as Box<dyn Fn(JsValue, JsValue)>)
    .into_js_value();

    let s = studio.clone();
    let get_fn = Closure::wrap(Box::new(move |key: JsValue| {
        let key = js_to_text(&key);
        s.storage
            .get::<Value>(&key)
            .and_then(|value| match json_to_js(&value) {
                Ok(js) => Some(js),
                Err(e) => {
                    error!("Error reading from localStorage: {}", describe_js_error(&e));
                    None
                }
            })
            .unwrap_or(JsValue::NULL)
    }) as Box<dyn Fn(JsValue) -> JsValue>)
    .into_js_value();

    let s = studio.clone();
    let remove_fn = Closure::wrap(Box::new(move |key: JsValue| {
        s.storage.remove(&js_to_text(&key));
    }) as Box<dyn Fn(JsValue)>)
    .into_js_value();

    set(&storage, "set", &set_fn)?;
    set(&storage, "get", &get_fn)?;
    set(&storage, "remove", &remove_fn)?;
    Ok(storage.into())
}
