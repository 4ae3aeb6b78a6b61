//! Model file layout, label maps, and logit post-processing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use duygu_core::ScoredLabel;
use duygu_settings::ModelSettings;
use serde::Deserialize;

use crate::errors::{ClassifierError, Result, ResultExt};

/// Paths to the three files an ONNX classifier needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelFiles {
    /// ONNX graph.
    pub onnx: PathBuf,
    /// `tokenizer.json`.
    pub tokenizer: PathBuf,
    /// `config.json` holding `id2label`.
    pub config: PathBuf,
}

impl ModelFiles {
    /// Lay out the configured file names under `dir`.
    pub fn in_dir(dir: &Path, settings: &ModelSettings) -> Self {
        Self {
            onnx: dir.join(&settings.onnx_file),
            tokenizer: dir.join(&settings.tokenizer_file),
            config: dir.join(&settings.config_file),
        }
    }

    /// Files that do not exist on disk.
    pub fn missing(&self) -> Vec<&Path> {
        [&self.onnx, &self.tokenizer, &self.config]
            .into_iter()
            .filter(|p| !p.exists())
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Resolve model files from a configured local directory.
///
/// Returns `Ok(None)` when no `modelDir` is set, so the caller can fall
/// back to a hub download.
pub fn local_files(settings: &ModelSettings) -> Result<Option<ModelFiles>> {
    let Some(dir) = settings.resolved_model_dir() else {
        return Ok(None);
    };
    let files = ModelFiles::in_dir(Path::new(&dir), settings);
    let missing = files.missing();
    if !missing.is_empty() {
        let list: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        return Err(ClassifierError::ModelNotAvailable(format!(
            "missing in {dir}: {}",
            list.join(", ")
        )));
    }
    Ok(Some(files))
}

/// Download (or reuse cached) model files from the Hugging Face hub.
///
/// Fetches from `settings.revision` when set, otherwise `main`.
#[cfg(feature = "ort")]
pub fn hub_files(settings: &ModelSettings, cache_dir: &str) -> Result<ModelFiles> {
    let mut builder = hf_hub::api::sync::ApiBuilder::new().with_cache_dir(PathBuf::from(cache_dir));
    if let Some(token) = &settings.api_token {
        builder = builder.with_token(Some(token.clone()));
    }
    let api = builder.build().model("hf-hub init")?;
    let repo = api.repo(hf_hub::Repo::with_revision(
        settings.repo.clone(),
        hf_hub::RepoType::Model,
        hub_revision(settings).to_string(),
    ));

    tracing::debug!(
        repo = %settings.repo,
        revision = hub_revision(settings),
        cache_dir,
        "fetching model files"
    );
    let fetch = |file: &str| {
        repo.get(file).map_err(|e| {
            ClassifierError::ModelNotAvailable(format!("{}: {e}", missing_file_hint(settings, file)))
        })
    };

    Ok(ModelFiles {
        onnx: fetch(&settings.onnx_file)?,
        tokenizer: fetch(&settings.tokenizer_file)?,
        config: fetch(&settings.config_file)?,
    })
}

fn hub_revision(settings: &ModelSettings) -> &str {
    settings.revision.as_deref().unwrap_or("main")
}

/// Explain how to obtain a model file the hub did not serve.
///
/// Most sentiment repos publish PyTorch weights only, so the ONNX graph and
/// `tokenizer.json` usually come from a local `optimum-cli` export.
pub fn missing_file_hint(settings: &ModelSettings, file: &str) -> String {
    format!(
        "{repo}@{rev} does not provide {file}; run `optimum-cli export onnx --model {repo} \
         --task text-classification <dir>` and set modelDir to <dir>, pin a revision that \
         carries the export, or use the http backend",
        repo = settings.repo,
        rev = hub_revision(settings),
    )
}

#[derive(Deserialize)]
struct ModelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Read `id2label` from a model config file, ordered by class index.
pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    parse_labels(&content)
}

/// Parse `id2label` from config JSON.
///
/// Keys must be the contiguous indices `0..n`.
pub fn parse_labels(json: &str) -> Result<Vec<String>> {
    let config: ModelConfig = serde_json::from_str(json).model_init("parse model config")?;
    if config.id2label.is_empty() {
        return Err(ClassifierError::ModelInit(
            "model config has no id2label".into(),
        ));
    }

    let mut labels = vec![None; config.id2label.len()];
    for (key, label) in config.id2label {
        let idx: usize = key
            .parse()
            .model_init(&format!("id2label key {key:?}"))?;
        let slot = labels.get_mut(idx).ok_or_else(|| {
            ClassifierError::ModelInit(format!("id2label index {idx} out of range"))
        })?;
        *slot = Some(label);
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(i, l)| l.ok_or_else(|| ClassifierError::ModelInit(format!("id2label missing {i}"))))
        .collect()
}

/// Numerically stable softmax over raw logits.
///
/// Logits are widened to `f64` before exponentiation so the margin check
/// downstream sees the same values the JSON response carries.
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let wide: Vec<f64> = logits.iter().map(|&x| f64::from(x)).collect();
    let max = wide.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = wide.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        exps.into_iter().map(|e| e / sum).collect()
    } else {
        vec![0.0; logits.len()]
    }
}

/// Pair probabilities with labels, highest score first.
pub fn rank(labels: &[String], probs: &[f64]) -> Vec<ScoredLabel> {
    let mut scored: Vec<ScoredLabel> = labels
        .iter()
        .zip(probs)
        .map(|(label, &score)| ScoredLabel::new(label.clone(), score))
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
