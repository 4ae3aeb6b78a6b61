//! Remote classifier speaking the Hugging Face text-classification protocol.
//!
//! Sends `{"inputs": text}` and accepts either a flat `[{label, score}]`
//! list or the nested `[[{label, score}]]` shape the hosted inference API
//! returns.

use async_trait::async_trait;
use duygu_core::RawScores;
use duygu_settings::ModelSettings;
use serde::Serialize;
use tracing::debug;

use crate::errors::{ClassifierError, Result, ResultExt};
use crate::service::SentimentClassifier;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// Classifier backed by an HTTP endpoint.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClassifier")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpClassifier {
    /// Create a classifier posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_token,
        }
    }

    /// Build from model settings; `endpoint` is required.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        let endpoint = settings
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                ClassifierError::Config(format!("http backend for {} needs an endpoint", settings.repo))
            })?;
        Ok(Self::new(endpoint, settings.api_token.clone()))
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<RawScores> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.request("send")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawScores = response.json().await.request("decode response")?;
        debug!(endpoint = %self.endpoint, "remote classification done");
        Ok(raw)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.endpoint)
    }
}
