//! `POST /api/predict`.

use axum::extract::State;
use axum::response::Json;
use duygu_core::{PredictRequest, PredictResponse};

use super::{run_prediction, Source};
use crate::errors::ApiError;
use crate::server::AppState;

/// Classify `{text, lang}` and return `{probs, label_tr, label_en}`.
///
/// Blank text yields the sentinel payload with status 200.
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let response = run_prediction(&state.analyzer, &request, Source::Api).await?;
    Ok(Json(response))
}
