//! Drag-and-drop and file-picker event handling
//!
//! The DOM side only translates raw browser events into [`UploadEvent`]s and
//! applies the returned [`EventOutcome`]; everything observable (highlight
//! state, callback invocation, default suppression) is decided here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::UploadConfig;

/// Metadata of a user-selected file as declared by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    /// Browser-reported MIME type; empty when the browser could not guess.
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Visual state of the drop region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Idle,
    DragOver,
}

/// The drop region as seen by [`UploadHandler`].
pub trait UploadSurface {
    fn set_highlight(&self, highlight: Highlight);
}

impl<S: UploadSurface + ?Sized> UploadSurface for std::rc::Rc<S> {
    fn set_highlight(&self, highlight: Highlight) {
        (**self).set_highlight(highlight)
    }
}

/// Raw interaction on the drop region or file picker, carrying the file set
/// type `F` of the host (`Vec<SelectedFile>`, a browser `FileList`, ...).
#[derive(Debug)]
pub enum UploadEvent<F> {
    DragOver,
    DragLeave,
    Drop(Option<F>),
    PickerChange(Option<F>),
}

/// What the host must do with the original event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Suppress the browser's default handling (navigating to the file).
    pub prevent_default: bool,
}

/// Routes upload events to a surface and a file-selection callback.
pub struct UploadHandler<S, F> {
    surface: S,
    on_select: Box<dyn FnMut(F)>,
}

impl<S: UploadSurface, F> UploadHandler<S, F> {
    pub fn new(surface: S, on_select: impl FnMut(F) + 'static) -> Self {
        Self {
            surface,
            on_select: Box::new(on_select),
        }
    }

    pub fn handle(&mut self, event: UploadEvent<F>) -> EventOutcome {
        match event {
            UploadEvent::DragOver => {
                self.surface.set_highlight(Highlight::DragOver);
                EventOutcome {
                    prevent_default: true,
                }
            }
            UploadEvent::DragLeave => {
                self.surface.set_highlight(Highlight::Idle);
                EventOutcome::default()
            }
            UploadEvent::Drop(files) => {
                self.surface.set_highlight(Highlight::Idle);
                match files {
                    Some(files) => (self.on_select)(files),
                    None => debug!("Drop event without a file list"),
                }
                EventOutcome {
                    prevent_default: true,
                }
            }
            UploadEvent::PickerChange(files) => {
                match files {
                    Some(files) => (self.on_select)(files),
                    None => debug!("File picker change without a file list"),
                }
                EventOutcome::default()
            }
        }
    }
}

impl UploadConfig {
    /// Border colour for a highlight state
    pub fn border_color(&self, highlight: Highlight) -> &str {
        match highlight {
            Highlight::Idle => &self.idle_color,
            Highlight::DragOver => &self.highlight_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSurface {
        states: RefCell<Vec<Highlight>>,
    }

    impl UploadSurface for RecordingSurface {
        fn set_highlight(&self, highlight: Highlight) {
            self.states.borrow_mut().push(highlight);
        }
    }

    fn handler() -> (
        UploadHandler<Rc<RecordingSurface>, Vec<SelectedFile>>,
        Rc<RecordingSurface>,
        Rc<RefCell<Vec<Vec<SelectedFile>>>>,
    ) {
        let surface = Rc::new(RecordingSurface::default());
        let selections = Rc::new(RefCell::new(Vec::new()));
        let sink = selections.clone();
        let handler = UploadHandler::new(surface.clone(), move |files| {
            sink.borrow_mut().push(files)
        });
        (handler, surface, selections)
    }

    #[test]
    fn dragover_highlights_and_prevents_default() {
        let (mut handler, surface, selections) = handler();
        let outcome = handler.handle(UploadEvent::DragOver);
        assert!(outcome.prevent_default);
        assert_eq!(*surface.states.borrow(), vec![Highlight::DragOver]);
        assert!(selections.borrow().is_empty());
    }

    #[test]
    fn dragleave_reverts_highlight() {
        let (mut handler, surface, _) = handler();
        handler.handle(UploadEvent::DragOver);
        let outcome = handler.handle(UploadEvent::DragLeave);
        assert!(!outcome.prevent_default);
        assert_eq!(
            *surface.states.borrow(),
            vec![Highlight::DragOver, Highlight::Idle]
        );
    }

    #[test]
    fn drop_delivers_files_once() {
        let (mut handler, surface, selections) = handler();
        let files = vec![
            SelectedFile::new("a.mp3", "audio/mpeg", 1000),
            SelectedFile::new("b.wav", "audio/wav", 2000),
        ];
        handler.handle(UploadEvent::DragOver);
        let outcome = handler.handle(UploadEvent::Drop(Some(files.clone())));

        assert!(outcome.prevent_default);
        assert_eq!(*selections.borrow(), vec![files]);
        assert_eq!(surface.states.borrow().last(), Some(&Highlight::Idle));
    }

    #[test]
    fn drop_without_files_skips_callback() {
        let (mut handler, surface, selections) = handler();
        let outcome = handler.handle(UploadEvent::Drop(None));
        assert!(outcome.prevent_default);
        assert!(selections.borrow().is_empty());
        assert_eq!(*surface.states.borrow(), vec![Highlight::Idle]);
    }

    #[test]
    fn picker_change_delivers_files_without_touching_highlight() {
        let (mut handler, surface, selections) = handler();
        let files = vec![SelectedFile::new("c.ogg", "audio/ogg", 10)];
        let outcome = handler.handle(UploadEvent::PickerChange(Some(files.clone())));
        assert!(!outcome.prevent_default);
        assert_eq!(*selections.borrow(), vec![files]);
        assert!(surface.states.borrow().is_empty());
    }

    #[test]
    fn border_colors_follow_config() {
        let config = UploadConfig::default();
        assert_eq!(config.border_color(Highlight::DragOver), "#2980b9");
        assert_eq!(config.border_color(Highlight::Idle), "#3498db");
    }
}
