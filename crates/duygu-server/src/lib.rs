//! # duygu-server
//!
//! Axum HTTP server for the sentiment service.
//!
//! - `POST /api/predict`: JSON `{text, lang}` → `{probs, label_tr, label_en}`
//! - `GET /` and `POST /`: server-rendered HTML form over the same function
//! - `GET /health` and `GET /metrics`
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use errors::ApiError;
pub use server::{AppState, DuyguServer};
pub use shutdown::{wait_for_signal, ShutdownCoordinator};
