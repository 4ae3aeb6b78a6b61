//! Per-language model settings.

use duygu_core::constants::{DEFAULT_ENGLISH_MODEL, DEFAULT_TURKISH_MODEL};
use duygu_core::Language;
use serde::{Deserialize, Serialize};

/// Lower bound for tokenizer truncation length.
pub const MIN_MAX_LENGTH: usize = 8;
/// Upper bound for tokenizer truncation length.
pub const MAX_MAX_LENGTH: usize = 4096;

/// How a model is executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// Local ONNX graph run in-process.
    #[default]
    Onnx,
    /// Remote text-classification endpoint.
    Http,
}

/// Settings for both models plus the shared download cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelsSettings {
    /// Download cache directory (may start with `~/`).
    pub cache_dir: String,
    /// Turkish model.
    pub turkish: ModelSettings,
    /// English model.
    pub english: ModelSettings,
}

impl Default for ModelsSettings {
    fn default() -> Self {
        Self {
            cache_dir: "~/.duygu/models".to_string(),
            turkish: ModelSettings {
                repo: DEFAULT_TURKISH_MODEL.to_string(),
                token_type_ids: true,
                ..ModelSettings::default()
            },
            english: ModelSettings {
                repo: DEFAULT_ENGLISH_MODEL.to_string(),
                token_type_ids: false,
                ..ModelSettings::default()
            },
        }
    }
}

impl ModelsSettings {
    /// Settings for one language.
    pub fn for_language(&self, lang: Language) -> &ModelSettings {
        match lang {
            Language::Tr => &self.turkish,
            Language::En => &self.english,
        }
    }

    /// Resolve the cache directory, expanding `~/` to the home directory.
    pub fn resolved_cache_dir(&self) -> String {
        expand_home(&self.cache_dir)
    }
}

/// Settings for a single sentiment model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Execution backend.
    pub backend: ModelBackend,
    /// Hugging Face repository id.
    pub repo: String,
    /// Hub revision (branch, tag, or commit) to fetch from; `main` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Local directory holding the model files; skips the download when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<String>,
    /// ONNX graph path, relative to the repo or `model_dir`.
    pub onnx_file: String,
    /// Tokenizer path, relative to the repo or `model_dir`.
    pub tokenizer_file: String,
    /// Model config path (for `id2label`), relative to the repo or `model_dir`.
    pub config_file: String,
    /// Whether the graph takes a `token_type_ids` input.
    pub token_type_ids: bool,
    /// Tokenizer truncation length.
    pub max_length: usize,
    /// Remote endpoint URL (`http` backend).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Bearer token for the remote endpoint or gated repos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            backend: ModelBackend::Onnx,
            repo: String::new(),
            revision: None,
            model_dir: None,
            onnx_file: "onnx/model.onnx".to_string(),
            tokenizer_file: "tokenizer.json".to_string(),
            config_file: "config.json".to_string(),
            token_type_ids: true,
            max_length: 512,
            endpoint: None,
            api_token: None,
        }
    }
}

impl ModelSettings {
    /// Local model directory with `~/` expanded, if configured.
    pub fn resolved_model_dir(&self) -> Option<String> {
        self.model_dir.as_deref().map(expand_home)
    }

    pub(crate) fn clamp_max_length(&mut self, name: &str) {
        let clamped = self.max_length.clamp(MIN_MAX_LENGTH, MAX_MAX_LENGTH);
        if clamped != self.max_length {
            tracing::warn!(
                model = name,
                "maxLength out of range ({}), clamped to {clamped}",
                self.max_length
            );
            self.max_length = clamped;
        }
    }
}

fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{home}/{rest}");
        }
    }
    path.to_string()
}
