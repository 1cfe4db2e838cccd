//! DOM wiring for the drop region and file picker

use std::cell::RefCell;
use std::rc::Rc;

use soundstudio_common::config::UploadConfig;
use soundstudio_common::{EventOutcome, Highlight, SelectedFile, UploadEvent, UploadHandler, UploadSurface};
use tracing::warn;
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::{describe_js_error, EventListener};

/// Drop region whose border colour tracks the highlight state
pub struct DomUploadSurface {
    area: web_sys_x::HtmlElement,
    config: UploadConfig,
}

impl UploadSurface for DomUploadSurface {
    fn set_highlight(&self, highlight: Highlight) {
        let color = self.config.border_color(highlight);
        if let Err(e) = self.area.style().set_property("border-color", color) {
            warn!("Failed to set drop area border: {}", describe_js_error(&e));
        }
    }
}

/// Listeners attached by [`handle_file_upload`]; dropping this detaches them.
pub struct UploadListeners {
    _listeners: Vec<EventListener>,
}

type DomHandler = UploadHandler<DomUploadSurface, web_sys_x::FileList>;

/// Wire drag-and-drop on `area` and `change` on `input` to `on_select`.
pub fn handle_file_upload(
    area: web_sys_x::HtmlElement,
    input: web_sys_x::HtmlInputElement,
    config: UploadConfig,
    on_select: impl FnMut(web_sys_x::FileList) + 'static,
) -> UploadListeners {
    let area_target: web_sys_x::EventTarget = area.clone().into();
    let input_target: web_sys_x::EventTarget = input.into();
    let handler: Rc<RefCell<DomHandler>> = Rc::new(RefCell::new(UploadHandler::new(
        DomUploadSurface { area, config },
        on_select,
    )));

    let listeners = vec![
        listen(&area_target, "dragover", &handler, |_| UploadEvent::DragOver),
        listen(&area_target, "dragleave", &handler, |_| UploadEvent::DragLeave),
        listen(&area_target, "drop", &handler, |event| {
            UploadEvent::Drop(dropped_files(event))
        }),
        listen(&input_target, "change", &handler, |event| {
            UploadEvent::PickerChange(picked_files(event))
        }),
    ];

    UploadListeners {
        _listeners: listeners,
    }
}

fn listen(
    target: &web_sys_x::EventTarget,
    event_name: &'static str,
    handler: &Rc<RefCell<DomHandler>>,
    translate: impl Fn(&web_sys_x::Event) -> UploadEvent<web_sys_x::FileList> + 'static,
) -> EventListener {
    let handler = handler.clone();
    EventListener::new(target, event_name, move |event: web_sys_x::Event| {
        let upload_event = translate(&event);
        let outcome = match handler.try_borrow_mut() {
            Ok(mut handler) => handler.handle(upload_event),
            Err(_) => {
                warn!("Ignoring {} raised while a file selection is being handled", event_name);
                return;
            }
        };
        apply(&event, outcome);
    })
}

fn apply(event: &web_sys_x::Event, outcome: EventOutcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
}

fn dropped_files(event: &web_sys_x::Event) -> Option<web_sys_x::FileList> {
    event
        .dyn_ref::<web_sys_x::DragEvent>()
        .and_then(|e| e.data_transfer())
        .and_then(|dt| dt.files())
}

fn picked_files(event: &web_sys_x::Event) -> Option<web_sys_x::FileList> {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys_x::HtmlInputElement>().ok())
        .and_then(|input| input.files())
}

/// Metadata for every file in a browser file list, in order.
pub fn selected_files(list: &web_sys_x::FileList) -> Vec<SelectedFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| SelectedFile::new(file.name(), file.type_(), file.size() as u64))
        .collect()
}

/// Read `name`, `type` and `size` off a `File` or any object shaped like one.
pub fn file_from_js(value: &JsValue) -> SelectedFile {
    let field = |name: &str| js_sys_x::Reflect::get(value, &name.into()).ok();
    SelectedFile {
        name: field("name").and_then(|v| v.as_string()).unwrap_or_default(),
        mime_type: field("type").and_then(|v| v.as_string()).unwrap_or_default(),
        size: field("size")
            .and_then(|v| v.as_f64())
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| s as u64)
            .unwrap_or(0),
    }
}
