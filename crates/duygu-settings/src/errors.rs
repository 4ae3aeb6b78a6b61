//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading `~/.duygu/settings.json`.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The settings file is not valid JSON.
    #[error("settings file {} is not valid JSON: {source}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// Valid JSON whose values do not fit the settings schema,
    /// e.g. `"port": "eighty"` or an unknown model backend.
    #[error("settings do not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_file() {
        let err = SettingsError::Read {
            path: PathBuf::from("/etc/duygu/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/duygu/settings.json"), "{msg}");
        assert!(msg.contains("denied"), "{msg}");
    }

    #[test]
    fn parse_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = SettingsError::Parse {
            path: PathBuf::from("settings.json"),
            source,
        };
        assert!(err.to_string().contains("not valid JSON"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn schema_error_from_conversion() {
        let json_err = serde_json::from_str::<u16>("\"eighty\"").unwrap_err();
        let err: SettingsError = json_err.into();
        assert!(matches!(err, SettingsError::Schema(_)));
        assert!(err.to_string().contains("expected schema"));
    }
}
