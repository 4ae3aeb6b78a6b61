//! Server configuration.

use duygu_settings::ServerSettings;
use serde::{Deserialize, Serialize};

/// Configuration for the Duygu server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_bytes: 1024 * 1024, // 1 MB
        }
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            max_body_bytes: settings.max_body_bytes,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 0);
        assert_eq!(cfg.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn from_settings_copies_fields() {
        let settings = ServerSettings {
            host: "0.0.0.0".into(),
            port: 7860,
            max_body_bytes: 4096,
        };
        let cfg = ServerConfig::from(&settings);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 7860);
        assert_eq!(cfg.max_body_bytes, 4096);
    }

    #[test]
    fn bind_addr_format() {
        let cfg = ServerConfig {
            host: "10.0.0.1".into(),
            port: 3000,
            ..ServerConfig::default()
        };
        assert_eq!(cfg.bind_addr(), "10.0.0.1:3000");
    }

    #[test]
    fn deserialize_from_json_string() {
        let json = r#"{"host":"10.0.0.1","port":3000,"max_body_bytes":512}"#;
        let cfg: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.host, "10.0.0.1");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_body_bytes, 512);
    }
}
