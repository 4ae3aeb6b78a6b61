//! # duygu-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`DuyguSettings::default()`]
//! 2. **User file**: `~/.duygu/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `DUYGU_*` overrides (highest priority)
//!
//! The binary loads settings once at startup and publishes them with
//! [`init_settings`]; anything else reads the snapshot via [`get_settings`].

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::{Arc, RwLock};

static SETTINGS: RwLock<Option<Arc<DuyguSettings>>> = RwLock::new(None);

/// Get the global settings snapshot.
///
/// On first call, loads from `~/.duygu/settings.json` with env var
/// overrides, falling back to compiled defaults if loading fails.
pub fn get_settings() -> Arc<DuyguSettings> {
    {
        let guard = SETTINGS.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    let mut guard = SETTINGS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            DuyguSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Publish a specific settings value, replacing any cached one.
pub fn init_settings(settings: DuyguSettings) {
    let mut guard = SETTINGS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = Some(Arc::new(settings));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_get_returns_published_value() {
        let mut custom = DuyguSettings::default();
        custom.server.port = 9999;
        init_settings(custom);
        assert_eq!(get_settings().server.port, 9999);
    }

    #[test]
    fn deep_merge_re_exported() {
        let merged = deep_merge(serde_json::json!({"x": 1}), serde_json::json!({"y": 2}));
        assert_eq!(merged["x"], 1);
        assert_eq!(merged["y"], 2);
    }
}
