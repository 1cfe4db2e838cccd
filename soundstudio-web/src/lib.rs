//! soundstudio-web - Browser bindings for the SoundStudio upload page
//!
//! Implements the `soundstudio-common` capability traits on top of the DOM,
//! `localStorage`, `setTimeout` and Plotly, and exposes the whole set to page
//! scripts as `window.soundstudio`.

pub mod banners;
pub mod local_storage;
pub mod logging;
pub mod namespace;
pub mod page_config;
pub mod plotly;
pub mod spinner;
pub mod timers;
pub mod upload;
pub mod wasm_utils;

pub use namespace::Studio;
