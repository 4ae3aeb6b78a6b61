//! HTTP handlers.
//!
//! Both the JSON API and the HTML form funnel through [`run_prediction`] so
//! metrics and logging stay identical across entry points.

pub mod form;
pub mod predict;

use std::time::Instant;

use duygu_classifier::{Result, SentimentAnalyzer};
use duygu_core::{Analysis, Language, PredictRequest, PredictResponse};
use metrics::{counter, histogram};
use tracing::{debug, warn};

use crate::metrics::{
    PREDICT_DURATION_SECONDS, PREDICT_EMPTY_TOTAL, PREDICT_ERRORS_TOTAL, PREDICT_LABEL_TOTAL,
    PREDICT_REQUESTS_TOTAL,
};

/// Where a prediction request came from (`source` metric label).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// `POST /api/predict`.
    Api,
    /// `POST /` form submission.
    Form,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Form => "form",
        }
    }
}

/// Analyze a request, record metrics, and shape the response.
pub(crate) async fn run_prediction(
    analyzer: &SentimentAnalyzer,
    request: &PredictRequest,
    source: Source,
) -> Result<PredictResponse> {
    let lang = Language::route(&request.lang).code();
    counter!(PREDICT_REQUESTS_TOTAL, "lang" => lang, "source" => source.as_str()).increment(1);

    let start = Instant::now();
    let analysis = match analyzer.analyze(&request.text, &request.lang).await {
        Ok(analysis) => analysis,
        Err(e) => {
            counter!(PREDICT_ERRORS_TOTAL, "lang" => lang).increment(1);
            warn!(lang, error = %e, "classification failed");
            return Err(e);
        }
    };

    match analysis {
        Analysis::Empty => counter!(PREDICT_EMPTY_TOTAL).increment(1),
        Analysis::Scored { label, .. } => {
            let elapsed = start.elapsed();
            histogram!(PREDICT_DURATION_SECONDS, "lang" => lang).record(elapsed.as_secs_f64());
            counter!(PREDICT_LABEL_TOTAL, "label" => label.as_str()).increment(1);
            debug!(
                lang,
                label = label.as_str(),
                elapsed_ms = elapsed.as_millis(),
                "classified"
            );
        }
    }

    Ok(PredictResponse::from_analysis(&analysis, &request.lang))
}
