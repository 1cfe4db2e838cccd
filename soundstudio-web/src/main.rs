//! Installs `window.soundstudio` when the module is loaded.

use std::rc::Rc;

use soundstudio_web::logging::init_logging;
use soundstudio_web::namespace::install;
use soundstudio_web::page_config::load_page_config;
use soundstudio_web::wasm_utils::describe_js_error;
use soundstudio_web::Studio;
use tracing::{error, info, warn};

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let Some(window) = web_sys_x::window() else {
        return;
    };

    let loaded = load_page_config(&window);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config.log_level);
    if let Err(e) = loaded {
        warn!("Ignoring window.SOUNDSTUDIO_CONFIG: {}", e);
    }

    let installed =
        Studio::new(window.clone(), config).and_then(|studio| install(&window, Rc::new(studio)));
    match installed {
        Ok(()) => info!("SoundStudio helpers ready"),
        Err(e) => error!("Failed to install SoundStudio helpers: {}", describe_js_error(&e)),
    }
}
