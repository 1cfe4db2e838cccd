//! Page-supplied configuration

use soundstudio_common::{ConfigError, StudioConfig};

use crate::wasm_utils::js_to_json;

/// Global the page may define before loading the module
pub const CONFIG_GLOBAL: &str = "SOUNDSTUDIO_CONFIG";

/// Read `window.SOUNDSTUDIO_CONFIG`, defaulting when it is not set.
pub fn load_page_config(window: &web_sys_x::Window) -> Result<StudioConfig, ConfigError> {
    let raw = js_sys_x::Reflect::get(window, &CONFIG_GLOBAL.into())
        .map_err(|_| ConfigError::Config(format!("cannot read window.{CONFIG_GLOBAL}")))?;
    if raw.is_undefined() || raw.is_null() {
        return Ok(StudioConfig::default());
    }
    let json = js_to_json(&raw).map_err(ConfigError::Serialization)?;
    StudioConfig::from_json(&json.to_string())
}
