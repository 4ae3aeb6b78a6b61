//! # duygu-core
//!
//! Shared vocabulary for the Duygu sentiment service.
//!
//! - **Labels**: [`types::Sentiment`] (negative / neutral / positive) and [`types::Language`]
//! - **Raw classifier output**: [`types::ScoredLabel`], [`types::RawScores`]
//! - **Results**: [`types::Probabilities`], [`types::Analysis`]
//! - **Wire format**: [`types::PredictRequest`], [`types::PredictResponse`]
//! - **Scoring**: [`scoring::normalize_scores`] and [`scoring::select_label`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other duygu crates.

#![deny(unsafe_code)]

pub mod constants;
pub mod scoring;
pub mod types;

pub use scoring::{analyze_scores, is_blank, normalize_scores, select_label};
pub use types::{
    Analysis, Language, PredictRequest, PredictResponse, Probabilities, ProbsPayload, RawScores,
    ScoredLabel, Sentiment,
};
