//! Labels, classifier output, and the `/api/predict` wire format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LANG, EMPTY_INPUT_MESSAGE, EMPTY_LABEL_EN, EMPTY_LABEL_TR};

// ─────────────────────────────────────────────────────────────────────────────
// Labels
// ─────────────────────────────────────────────────────────────────────────────

/// The three canonical sentiment classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Negative sentiment.
    Negative,
    /// Neither positive nor negative.
    Neutral,
    /// Positive sentiment.
    Positive,
}

impl Sentiment {
    /// All classes in canonical order. Argmax ties resolve in this order.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Lowercase English name (`"negative"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }

    /// Turkish display name.
    pub fn turkish(self) -> &'static str {
        match self {
            Self::Negative => "negatif",
            Self::Neutral => "nötr",
            Self::Positive => "pozitif",
        }
    }

    /// Map an arbitrary classifier label onto a canonical class.
    ///
    /// Matching is case-insensitive on substrings, checked in the order
    /// `pos`, `neg`, `neu`. Labels matching none of them yield `None`.
    pub fn from_raw_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("pos") {
            Some(Self::Positive)
        } else if label.contains("neg") {
            Some(Self::Negative)
        } else if label.contains("neu") {
            Some(Self::Neutral)
        } else {
            None
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which model a request is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Turkish model.
    Tr,
    /// English model.
    En,
}

impl Language {
    /// Route a request `lang` value: `"en"` selects English, anything else Turkish.
    pub fn route(lang: &str) -> Self {
        if lang.trim().eq_ignore_ascii_case("en") {
            Self::En
        } else {
            Self::Tr
        }
    }

    /// Short code (`"tr"` / `"en"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classifier output
// ─────────────────────────────────────────────────────────────────────────────

/// One `{label, score}` pair as emitted by a pretrained classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// Label exactly as the model spells it.
    pub label: String,
    /// Model confidence.
    pub score: f64,
}

impl ScoredLabel {
    /// Convenience constructor.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Raw classifier output, flat or nested one level (`[[...]]`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScores {
    /// Batched shape; only the first inner list is meaningful.
    Nested(Vec<Vec<ScoredLabel>>),
    /// Plain list of pairs.
    Flat(Vec<ScoredLabel>),
}

impl RawScores {
    /// Flatten one level of nesting, keeping the first inner list.
    pub fn into_flat(self) -> Vec<ScoredLabel> {
        match self {
            Self::Flat(scores) => scores,
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

impl From<Vec<ScoredLabel>> for RawScores {
    fn from(scores: Vec<ScoredLabel>) -> Self {
        Self::Flat(scores)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────────────────

/// Dense distribution over the three classes. Unseen classes stay at `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Score for [`Sentiment::Negative`].
    pub negative: f64,
    /// Score for [`Sentiment::Neutral`].
    pub neutral: f64,
    /// Score for [`Sentiment::Positive`].
    pub positive: f64,
}

impl Probabilities {
    /// Score of one class.
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    /// Overwrite the score of one class.
    pub fn set(&mut self, sentiment: Sentiment, score: f64) {
        match sentiment {
            Sentiment::Negative => self.negative = score,
            Sentiment::Neutral => self.neutral = score,
            Sentiment::Positive => self.positive = score,
        }
    }

    /// Iterate `(class, score)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, f64)> + '_ {
        Sentiment::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// Outcome of analysing one piece of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Analysis {
    /// Input was blank; no model was called.
    Empty,
    /// Model output after normalization and label selection.
    Scored {
        /// Per-class scores.
        probs: Probabilities,
        /// Selected class.
        label: Sentiment,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

/// `POST /api/predict` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Text to classify.
    #[serde(default)]
    pub text: String,
    /// Language selector, `"tr"` when omitted.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for PredictRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            lang: default_lang(),
        }
    }
}

/// The `probs` field: class scores, or the blank-input error object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbsPayload {
    /// Three-class distribution.
    Scores(Probabilities),
    /// `{"error": "..."}` sentinel.
    Error {
        /// Error message.
        error: String,
    },
}

/// `POST /api/predict` response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Class scores or the error sentinel.
    pub probs: ProbsPayload,
    /// Turkish label of the verdict.
    pub label_tr: String,
    /// Upper-case English label with the requested language, e.g. `"POSITIVE (EN)"`.
    pub label_en: String,
}

impl PredictResponse {
    /// The fixed blank-input payload.
    pub fn empty() -> Self {
        Self {
            probs: ProbsPayload::Error {
                error: EMPTY_INPUT_MESSAGE.to_string(),
            },
            label_tr: EMPTY_LABEL_TR.to_string(),
            label_en: EMPTY_LABEL_EN.to_string(),
        }
    }

    /// Shape an [`Analysis`]. `lang` is echoed verbatim (upper-cased) in `label_en`.
    pub fn from_analysis(analysis: &Analysis, lang: &str) -> Self {
        match *analysis {
            Analysis::Empty => Self::empty(),
            Analysis::Scored { probs, label } => Self {
                probs: ProbsPayload::Scores(probs),
                label_tr: label.turkish().to_string(),
                label_en: format!(
                    "{} ({})",
                    label.as_str().to_uppercase(),
                    lang.to_uppercase()
                ),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
