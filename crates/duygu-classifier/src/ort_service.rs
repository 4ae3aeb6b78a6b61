//! ONNX Runtime classifier (feature-gated behind `ort`).
//!
//! Resolves model files from a local directory or the Hugging Face hub,
//! tokenizes with `tokenizers`, runs the sequence-classification graph via
//! `ort`, then applies softmax over the logits and labels each class from
//! the model's `id2label`.

use std::sync::Arc;

use async_trait::async_trait;
use duygu_core::{RawScores, ScoredLabel};
use duygu_settings::ModelSettings;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::errors::{ClassifierError, Result, ResultExt};
use crate::model::{self, ModelFiles};
use crate::service::SentimentClassifier;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Combined session + tokenizer state behind a single mutex.
struct InferenceState {
    session: ort::session::Session,
    tokenizer: tokenizers::Tokenizer,
}

/// In-process sentiment classifier backed by an ONNX graph.
pub struct OnnxClassifier {
    repo: String,
    labels: Arc<[String]>,
    token_type_ids: bool,
    state: Arc<Mutex<InferenceState>>,
}

impl OnnxClassifier {
    /// Load tokenizer, label map, and ONNX session.
    ///
    /// May download from the hub; runs on a blocking thread.
    pub async fn load(settings: &ModelSettings, cache_dir: &str) -> Result<Self> {
        let (state, labels) = tokio::task::spawn_blocking({
            let settings = settings.clone();
            let cache_dir = cache_dir.to_string();
            move || -> Result<(InferenceState, Vec<String>)> {
                let files = match model::local_files(&settings)? {
                    Some(files) => files,
                    None => model::hub_files(&settings, &cache_dir)?,
                };
                let labels = model::load_labels(&files.config)?;
                let state = initialize_inner(&files, settings.max_length)
                    .map_err(|e| ClassifierError::ModelInit(e.to_string()))?;
                Ok((state, labels))
            }
        })
        .await
        .model_init("join")??;

        info!(repo = %settings.repo, labels = ?labels, "ONNX classifier ready");
        Ok(Self {
            repo: settings.repo.clone(),
            labels: labels.into(),
            token_type_ids: settings.token_type_ids,
            state: Arc::new(Mutex::new(state)),
        })
    }
}

/// Create tokenizer and ONNX session.
///
/// Uses `Box<dyn Error>` internally so all calls can use `?` directly.
/// The caller maps the error to `ClassifierError::ModelInit` at the boundary.
fn initialize_inner(
    files: &ModelFiles,
    max_length: usize,
) -> std::result::Result<InferenceState, BoxError> {
    let mut tokenizer = tokenizers::Tokenizer::from_file(&files.tokenizer)
        .map_err(|e| format!("tokenizer load: {e}"))?;
    let _ = tokenizer
        .with_truncation(Some(tokenizers::TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| format!("tokenizer truncation: {e}"))?;
    let _ = tokenizer.with_padding(None);

    let session = ort::session::Session::builder()?
        .with_intra_threads(2)?
        .with_log_level(ort::logging::LogLevel::Warning)?
        .commit_from_file(&files.onnx)?;

    info!(model = %files.onnx.display(), max_length, "ONNX model loaded");
    Ok(InferenceState { session, tokenizer })
}

fn run_inference(
    state: &mut InferenceState,
    text: &str,
    labels: &[String],
    token_type_ids: bool,
) -> Result<Vec<ScoredLabel>> {
    run_inference_inner(state, text, labels, token_type_ids)
        .map_err(|e| ClassifierError::Inference(e.to_string()))
}

fn run_inference_inner(
    state: &mut InferenceState,
    text: &str,
    labels: &[String],
    token_type_ids: bool,
) -> std::result::Result<Vec<ScoredLabel>, BoxError> {
    let encoding = state.tokenizer.encode(text, true)?;

    let ids: Vec<i64> = encoding.get_ids().iter().map(|&i| i64::from(i)).collect();
    if ids.is_empty() {
        return Err("empty tokenization".into());
    }
    let mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| i64::from(m))
        .collect();

    #[allow(clippy::cast_possible_wrap)]
    let shape = vec![1i64, ids.len() as i64];
    debug!(tokens = ids.len(), "running classifier");

    let input_ids = ort::value::Tensor::from_array((shape.clone(), ids))?;
    let attention_mask = ort::value::Tensor::from_array((shape.clone(), mask))?;

    let outputs = if token_type_ids {
        let types: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| i64::from(t))
            .collect();
        let token_types = ort::value::Tensor::from_array((shape, types))?;
        state.session.run(ort::inputs![
            "input_ids" => input_ids,
            "attention_mask" => attention_mask,
            "token_type_ids" => token_types
        ])?
    } else {
        state.session.run(ort::inputs![
            "input_ids" => input_ids,
            "attention_mask" => attention_mask
        ])?
    };

    let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
    if logits.len() != labels.len() {
        return Err(format!(
            "logit shape {output_shape:?} does not match {} labels",
            labels.len()
        )
        .into());
    }

    let probs = model::softmax(logits);
    Ok(model::rank(labels, &probs))
}

#[async_trait]
impl SentimentClassifier for OnnxClassifier {
    async fn classify(&self, text: &str) -> Result<RawScores> {
        let state = Arc::clone(&self.state);
        let labels = Arc::clone(&self.labels);
        let token_type_ids = self.token_type_ids;
        let text = text.to_string();

        // Lock inside the blocking thread so concurrent requests queue on the
        // session instead of holding a sync mutex across an await.
        let scored = tokio::task::spawn_blocking(move || {
            let mut guard = state.lock();
            run_inference(&mut guard, &text, &labels, token_type_ids)
        })
        .await
        .inference("join")??;

        Ok(RawScores::Flat(scored))
    }

    fn describe(&self) -> String {
        format!("onnx:{}", self.repo)
    }
}
