//! Plotly bindings
//!
//! Plotly is loaded by the page as a global script, so it is reached through
//! `window.Plotly` with `Reflect` instead of typed imports.

use soundstudio_common::{ChartBackend, ChartError, PlotConfig};
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::{describe_js_error, json_to_js};

pub struct PlotlyBackend {
    window: web_sys_x::Window,
}

impl PlotlyBackend {
    pub fn new(window: web_sys_x::Window) -> Self {
        Self { window }
    }

    fn plotly(&self) -> Result<JsValue, ChartError> {
        let plotly = js_sys_x::Reflect::get(&self.window, &"Plotly".into())
            .map_err(|e| ChartError::Backend(describe_js_error(&e)))?;
        if plotly.is_undefined() || plotly.is_null() {
            return Err(ChartError::LibraryMissing);
        }
        Ok(plotly)
    }
}

impl ChartBackend for PlotlyBackend {
    type Payload = JsValue;

    fn has_container(&self, container_id: &str) -> bool {
        self.window
            .document()
            .and_then(|doc| doc.get_element_by_id(container_id))
            .is_some()
    }

    fn new_plot(
        &self,
        container_id: &str,
        data: &JsValue,
        layout: &JsValue,
        config: &PlotConfig,
    ) -> Result<(), ChartError> {
        let plotly = self.plotly()?;
        let new_plot = js_sys_x::Reflect::get(&plotly, &"newPlot".into())
            .map_err(|e| ChartError::Backend(describe_js_error(&e)))?;
        let func = new_plot
            .dyn_ref::<js_sys_x::Function>()
            .ok_or(ChartError::LibraryMissing)?;

        let config = serde_json::to_value(config)
            .map_err(|e| ChartError::Backend(e.to_string()))
            .and_then(|v| json_to_js(&v).map_err(|e| ChartError::Backend(describe_js_error(&e))))?;

        // newPlot returns a promise; rendering errors surface in the console.
        func.apply(
            &plotly,
            &js_sys_x::Array::of4(&container_id.into(), data, layout, &config),
        )
        .map_err(|e| ChartError::Backend(describe_js_error(&e)))?;
        Ok(())
    }
}
