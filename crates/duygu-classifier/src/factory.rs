//! Build classifiers from settings.

use std::sync::Arc;

use duygu_core::Language;
use duygu_settings::{ModelBackend, ModelSettings, ModelsSettings};
use tracing::info;

use crate::analyzer::SentimentAnalyzer;
use crate::errors::Result;
use crate::http_service::HttpClassifier;
use crate::service::SentimentClassifier;

/// Build the classifier configured for one language.
pub async fn build_classifier(
    lang: Language,
    settings: &ModelSettings,
    cache_dir: &str,
) -> Result<Arc<dyn SentimentClassifier>> {
    let classifier: Arc<dyn SentimentClassifier> = match settings.backend {
        ModelBackend::Http => Arc::new(HttpClassifier::from_settings(settings)?),
        ModelBackend::Onnx => load_onnx(settings, cache_dir).await?,
    };
    info!(lang = lang.code(), classifier = %classifier.describe(), "classifier loaded");
    Ok(classifier)
}

#[cfg(feature = "ort")]
async fn load_onnx(settings: &ModelSettings, cache_dir: &str) -> Result<Arc<dyn SentimentClassifier>> {
    Ok(Arc::new(
        crate::ort_service::OnnxClassifier::load(settings, cache_dir).await?,
    ))
}

#[cfg(not(feature = "ort"))]
async fn load_onnx(settings: &ModelSettings, _cache_dir: &str) -> Result<Arc<dyn SentimentClassifier>> {
    Err(crate::errors::ClassifierError::Config(format!(
        "onnx backend for {} requires the `ort` feature; set backend to \"http\" with an endpoint instead",
        settings.repo
    )))
}

/// Load both models concurrently and wrap them in an analyzer.
pub async fn build_analyzer(models: &ModelsSettings) -> Result<SentimentAnalyzer> {
    let cache_dir = models.resolved_cache_dir();
    let (turkish, english) = tokio::try_join!(
        build_classifier(Language::Tr, models.for_language(Language::Tr), &cache_dir),
        build_classifier(Language::En, models.for_language(Language::En), &cache_dir),
    )?;
    Ok(SentimentAnalyzer::new(turkish, english))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClassifierError;
    use assert_matches::assert_matches;

    fn http_models(tr: &str, en: &str) -> ModelsSettings {
        let mut models = ModelsSettings::default();
        models.turkish.backend = ModelBackend::Http;
        models.turkish.endpoint = Some(tr.to_string());
        models.english.backend = ModelBackend::Http;
        models.english.endpoint = Some(en.to_string());
        models
    }

    #[tokio::test]
    async fn http_backend_builds_without_network() {
        let models = http_models("http://tr.local/predict", "http://en.local/predict");
        let analyzer = build_analyzer(&models).await.unwrap();
        assert_eq!(
            analyzer.describe(),
            (
                "http:http://tr.local/predict".to_string(),
                "http:http://en.local/predict".to_string()
            )
        );
    }

    #[tokio::test]
    async fn http_backend_without_endpoint_fails() {
        let mut models = http_models("http://tr.local", "http://en.local");
        models.english.endpoint = None;
        assert_matches!(build_analyzer(&models).await, Err(ClassifierError::Config(_)));
    }

    #[cfg(not(feature = "ort"))]
    #[tokio::test]
    async fn onnx_backend_requires_feature() {
        let settings = ModelSettings::default();
        let result = build_classifier(Language::Tr, &settings, "/tmp").await;
        assert_matches!(result, Err(ClassifierError::Config(ref msg)) if msg.contains("http"));
    }
}
