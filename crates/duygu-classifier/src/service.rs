//! Classifier trait and mock implementation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use duygu_core::{RawScores, ScoredLabel};

use crate::errors::{ClassifierError, Result};

/// A pretrained text classifier that returns one score per class label.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Score `text` against every class the model knows.
    ///
    /// Labels are returned as the model names them (e.g. `"LABEL_2"`,
    /// `"positive"`); mapping onto the three sentiments happens later.
    async fn classify(&self, text: &str) -> Result<RawScores>;

    /// Short identifier used in logs and `/health`, e.g. `onnx:owner/repo`.
    fn describe(&self) -> String;
}

impl std::fmt::Debug for dyn SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SentimentClassifier")
            .field(&self.describe())
            .finish()
    }
}

/// Mock classifier for testing.
///
/// Returns a fixed score list for every input and counts how often it was
/// called, so callers can assert that a model was (or was not) consulted.
pub struct MockClassifier {
    name: String,
    scores: Vec<ScoredLabel>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockClassifier {
    /// Create a mock that always answers with `scores`.
    pub fn new(scores: Vec<ScoredLabel>) -> Self {
        Self {
            name: "mock".to_string(),
            scores,
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Build from `(label, score)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(label, score)| ScoredLabel::new(*label, *score))
                .collect(),
        )
    }

    /// Override the name reported by [`SentimentClassifier::describe`].
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make subsequent calls fail with an inference error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, _text: &str) -> Result<RawScores> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClassifierError::Inference("mock failure".into()));
        }
        Ok(RawScores::Flat(self.scores.clone()))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
