//! Language routing and end-to-end analysis.

use std::sync::Arc;

use duygu_core::{
    analyze_scores, is_blank, Analysis, Language, PredictRequest, PredictResponse,
};
use tracing::{debug, instrument};

use crate::errors::Result;
use crate::service::SentimentClassifier;

/// Routes text to the Turkish or English classifier and reduces the
/// result to a three-way verdict.
#[derive(Clone, Debug)]
pub struct SentimentAnalyzer {
    turkish: Arc<dyn SentimentClassifier>,
    english: Arc<dyn SentimentClassifier>,
}

impl SentimentAnalyzer {
    /// Create from one classifier per language.
    pub fn new(
        turkish: Arc<dyn SentimentClassifier>,
        english: Arc<dyn SentimentClassifier>,
    ) -> Self {
        Self { turkish, english }
    }

    /// Classifier serving `lang`.
    pub fn classifier_for(&self, lang: Language) -> &Arc<dyn SentimentClassifier> {
        match lang {
            Language::Tr => &self.turkish,
            Language::En => &self.english,
        }
    }

    /// Analyze `text` with the model selected by `lang`.
    ///
    /// Blank text short-circuits to [`Analysis::Empty`] without touching
    /// either model.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str, lang: &str) -> Result<Analysis> {
        if is_blank(text) {
            debug!("blank input");
            return Ok(Analysis::Empty);
        }
        let language = Language::route(lang);
        let raw = self.classifier_for(language).classify(text).await?;
        Ok(analyze_scores(raw))
    }

    /// Analyze a request and build the wire response.
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse> {
        let analysis = self.analyze(&request.text, &request.lang).await?;
        Ok(PredictResponse::from_analysis(&analysis, &request.lang))
    }

    /// `describe()` of both classifiers as `(turkish, english)`.
    pub fn describe(&self) -> (String, String) {
        (self.turkish.describe(), self.english.describe())
    }
}
