//! `/health` endpoint.

use serde::Serialize;
use std::time::Instant;

/// Loaded model per language.
#[derive(Debug, Clone, Serialize)]
pub struct ModelsHealth {
    /// Turkish classifier description.
    pub tr: String,
    /// English classifier description.
    pub en: String,
}

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Which classifier serves each language.
    pub models: ModelsHealth,
}

/// Build a health response.
pub fn health_check(start_time: Instant, models: (String, String)) -> HealthResponse {
    let (tr, en) = models;
    HealthResponse {
        status: "ok".into(),
        uptime_secs: start_time.elapsed().as_secs(),
        models: ModelsHealth { tr, en },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> (String, String) {
        ("onnx:tr".to_string(), "http:en".to_string())
    }

    #[test]
    fn status_is_ok() {
        let resp = health_check(Instant::now(), models());
        assert_eq!(resp.status, "ok");
    }

    #[test]
    fn uptime_starts_at_zero() {
        let resp = health_check(Instant::now(), models());
        assert!(resp.uptime_secs < 2);
    }

    #[test]
    fn uptime_increases() {
        let start = Instant::now()
            .checked_sub(std::time::Duration::from_secs(60))
            .unwrap();
        let resp = health_check(start, models());
        assert!(resp.uptime_secs >= 59);
    }

    #[test]
    fn serialization() {
        let resp = health_check(Instant::now(), models());
        let parsed = serde_json::to_value(&resp).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["models"]["tr"], "onnx:tr");
        assert_eq!(parsed["models"]["en"], "http:en");
        assert!(parsed["uptime_secs"].is_number());
    }
}
