//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so partial
//! JSON is accepted; missing fields take their compiled default.

mod models;

pub use models::*;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// Loaded from `~/.duygu/settings.json` with defaults applied for missing
/// fields. `DUYGU_*` environment variables override specific values.
///
/// ```json
/// {
///   "server": { "port": 8000 },
///   "models": { "english": { "backend": "http", "endpoint": "http://tei:8080/predict" } }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuyguSettings {
    /// Settings schema version.
    pub version: String,
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
    /// Turkish and English model settings.
    pub models: ModelsSettings,
}

impl Default for DuyguSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
            models: ModelsSettings::default(),
        }
    }
}

impl DuyguSettings {
    /// Clamp out-of-range values with a warning rather than rejecting them.
    pub fn validate(&mut self) {
        self.models.turkish.clamp_max_length("turkish");
        self.models.english.clamp_max_length("english");

        if self.server.max_body_bytes == 0 {
            tracing::warn!(
                "server.maxBodyBytes is 0, using {}",
                ServerSettings::default().max_body_bytes
            );
            self.server.max_body_bytes = ServerSettings::default().max_body_bytes;
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request body limit in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Minimum level for emitted log events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warnings and errors.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parse a level name (case-insensitive).
    pub fn parse(val: &str) -> Option<Self> {
        match val.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Log output settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level (overridden by `RUST_LOG` when set).
    pub level: LogLevel,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}
