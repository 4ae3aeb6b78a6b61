//! Classifier error types.

/// Errors from loading or invoking a sentiment classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Model files not found or failed to download.
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// Tokenizer, label map, or ONNX session could not be created.
    #[error("model initialization failed: {0}")]
    ModelInit(String),

    /// Tokenization or graph execution failed.
    #[error("inference error: {0}")]
    Inference(String),

    /// Remote endpoint answered with a non-success status.
    #[error("remote classifier returned {status}: {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body (may be empty).
        body: String,
    },

    /// Remote endpoint could not be reached or returned an unreadable body.
    #[error("remote request failed: {0}")]
    Request(String),

    /// Settings do not describe a usable classifier.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error (file read).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassifierError {
    /// Short machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModelNotAvailable(_) => "MODEL_NOT_AVAILABLE",
            Self::ModelInit(_) => "MODEL_INIT_FAILED",
            Self::Inference(_) => "INFERENCE_FAILED",
            Self::Remote { .. } | Self::Request(_) => "REMOTE_CLASSIFIER_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

/// Result alias for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Extension trait to reduce `.map_err()` boilerplate when wrapping errors into [`ClassifierError`].
pub trait ResultExt<T> {
    /// Wrap the error as [`ClassifierError::Inference`] with `context` prefix.
    fn inference(self, context: &str) -> Result<T>;
    /// Wrap the error as [`ClassifierError::ModelInit`] with `context` prefix.
    fn model_init(self, context: &str) -> Result<T>;
    /// Wrap the error as [`ClassifierError::ModelNotAvailable`] with `context` prefix.
    fn model(self, context: &str) -> Result<T>;
    /// Wrap the error as [`ClassifierError::Request`] with `context` prefix.
    fn request(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn inference(self, context: &str) -> Result<T> {
        self.map_err(|e| ClassifierError::Inference(format!("{context}: {e}")))
    }
    fn model_init(self, context: &str) -> Result<T> {
        self.map_err(|e| ClassifierError::ModelInit(format!("{context}: {e}")))
    }
    fn model(self, context: &str) -> Result<T> {
        self.map_err(|e| ClassifierError::ModelNotAvailable(format!("{context}: {e}")))
    }
    fn request(self, context: &str) -> Result<T> {
        self.map_err(|e| ClassifierError::Request(format!("{context}: {e}")))
    }
}
