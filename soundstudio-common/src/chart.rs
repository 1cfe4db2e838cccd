//! Plot rendering passthrough

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Plotting library not loaded")]
    LibraryMissing,
    #[error("Plot call failed: {0}")]
    Backend(String),
}

/// Fixed options handed to the plotting library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotConfig {
    pub responsive: bool,
    pub display_mode_bar: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: false,
        }
    }
}

/// External plotting library. `Payload` is the host's representation of
/// data series and layout (a `JsValue` in the browser).
pub trait ChartBackend {
    type Payload: ?Sized;

    fn has_container(&self, container_id: &str) -> bool;

    fn new_plot(
        &self,
        container_id: &str,
        data: &Self::Payload,
        layout: &Self::Payload,
        config: &PlotConfig,
    ) -> Result<(), ChartError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    /// No element with the container id exists
    Skipped,
    Plotted,
}

/// Render `data` into `container_id`, silently skipping unknown containers.
pub fn create_visualization<B: ChartBackend + ?Sized>(
    backend: &B,
    container_id: &str,
    data: &B::Payload,
    layout: &B::Payload,
    config: &PlotConfig,
) -> Result<Rendered, ChartError> {
    if !backend.has_container(container_id) {
        debug!("No chart container '{}', skipping", container_id);
        return Ok(Rendered::Skipped);
    }
    backend.new_plot(container_id, data, layout, config)?;
    Ok(Rendered::Plotted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    struct FakePlotter {
        containers: Vec<&'static str>,
        calls: RefCell<Vec<(String, Value, Value, Value)>>,
    }

    impl ChartBackend for FakePlotter {
        type Payload = Value;

        fn has_container(&self, container_id: &str) -> bool {
            self.containers.iter().any(|c| *c == container_id)
        }

        fn new_plot(
            &self,
            container_id: &str,
            data: &Value,
            layout: &Value,
            config: &PlotConfig,
        ) -> Result<(), ChartError> {
            self.calls.borrow_mut().push((
                container_id.to_string(),
                data.clone(),
                layout.clone(),
                serde_json::to_value(config).map_err(|e| ChartError::Backend(e.to_string()))?,
            ));
            Ok(())
        }
    }

    #[test]
    fn plots_into_existing_container_with_fixed_options() {
        let plotter = FakePlotter {
            containers: vec!["waveform"],
            calls: RefCell::default(),
        };
        let data = json!([{"y": [0.1, -0.2, 0.3], "type": "scatter"}]);
        let layout = json!({"title": "Waveform"});

        let rendered =
            create_visualization(&plotter, "waveform", &data, &layout, &PlotConfig::default())
                .unwrap();

        assert_eq!(rendered, Rendered::Plotted);
        let calls = plotter.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "waveform");
        assert_eq!(calls[0].1, data);
        assert_eq!(calls[0].3, json!({"responsive": true, "displayModeBar": false}));
    }

    #[test]
    fn missing_container_is_a_no_op() {
        let plotter = FakePlotter {
            containers: vec![],
            calls: RefCell::default(),
        };
        let rendered = create_visualization(
            &plotter,
            "spectrum",
            &json!([]),
            &json!({}),
            &PlotConfig::default(),
        )
        .unwrap();
        assert_eq!(rendered, Rendered::Skipped);
        assert!(plotter.calls.borrow().is_empty());
    }
}
