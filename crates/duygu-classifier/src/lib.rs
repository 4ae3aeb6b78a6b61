//! # duygu-classifier
//!
//! Pretrained sentiment classifiers and per-language routing.
//!
//! - [`SentimentClassifier`]: async trait returning raw `{label, score}` lists
//! - [`MockClassifier`]: fixed scores with a call counter (always available)
//! - [`HttpClassifier`]: remote text-classification endpoint
//! - `OnnxClassifier`: in-process ONNX inference (requires `ort` feature)
//! - [`SentimentAnalyzer`]: blank-input guard, routing, and label selection
//!
//! ## Feature Flags
//!
//! - `ort`: enables ONNX Runtime inference, hub downloads, and tokenization

#![deny(unsafe_code)]

pub mod analyzer;
pub mod errors;
pub mod factory;
pub mod http_service;
pub mod model;
pub mod service;

#[cfg(feature = "ort")]
pub mod ort_service;

pub use analyzer::SentimentAnalyzer;
pub use errors::{ClassifierError, Result};
pub use factory::{build_analyzer, build_classifier};
pub use http_service::HttpClassifier;
pub use service::{MockClassifier, SentimentClassifier};

#[cfg(feature = "ort")]
pub use ort_service::OnnxClassifier;
