//! Prometheus metrics recorder and `/metrics` endpoint handler.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Call once at startup before any metrics are recorded.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("prometheus metrics recorder installed");
    Ok(handle)
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

// Metric name constants to avoid typos across modules.

/// Prediction requests total (counter, labels: lang, source).
pub const PREDICT_REQUESTS_TOTAL: &str = "predict_requests_total";
/// Blank-input requests total (counter).
pub const PREDICT_EMPTY_TOTAL: &str = "predict_empty_total";
/// Classifier failures total (counter, labels: lang).
pub const PREDICT_ERRORS_TOTAL: &str = "predict_errors_total";
/// Classifier latency seconds (histogram, labels: lang).
pub const PREDICT_DURATION_SECONDS: &str = "predict_duration_seconds";
/// Verdicts total (counter, labels: label).
pub const PREDICT_LABEL_TOTAL: &str = "predict_label_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_global_install() {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let output = render(&handle);
        assert!(output.is_empty() || output.contains('#') || output.contains('\n'));
    }

    #[test]
    fn metric_constants_are_snake_case() {
        let names = [
            PREDICT_REQUESTS_TOTAL,
            PREDICT_EMPTY_TOTAL,
            PREDICT_ERRORS_TOTAL,
            PREDICT_DURATION_SECONDS,
            PREDICT_LABEL_TOTAL,
        ];
        for name in names {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "metric name '{name}' must be snake_case"
            );
        }
    }
}
