//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`DuyguSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply `DUYGU_*` environment overrides (highest priority)
//! 4. [`DuyguSettings::validate`] clamps out-of-range values
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{DuyguSettings, LogLevel, ModelBackend};

/// Resolve the path to the settings file (`~/.duygu/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".duygu").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<DuyguSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<DuyguSettings> {
    let mut settings = load_file_layers(path)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
fn load_file_layers(path: &Path) -> Result<DuyguSettings> {
    let defaults = serde_json::to_value(DuyguSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `DUYGU_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut DuyguSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup` (env var name → value).
///
/// Invalid values are ignored with a warning; empty strings count as unset.
pub fn apply_overrides_from<F>(settings: &mut DuyguSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = get("DUYGU_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = get("DUYGU_PORT") {
        match parse_u16_range(&v, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => warn_invalid("DUYGU_PORT", &v),
        }
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = get("DUYGU_LOG_LEVEL") {
        match LogLevel::parse(&v) {
            Some(level) => settings.logging.level = level,
            None => warn_invalid("DUYGU_LOG_LEVEL", &v),
        }
    }
    if let Some(v) = get("DUYGU_LOG_JSON") {
        match parse_bool(&v) {
            Some(json) => settings.logging.json = json,
            None => warn_invalid("DUYGU_LOG_JSON", &v),
        }
    }

    // ── Models ──────────────────────────────────────────────────────
    if let Some(v) = get("DUYGU_MODEL_CACHE_DIR") {
        settings.models.cache_dir = v;
    }
    if let Some(v) = get("DUYGU_TR_MODEL") {
        settings.models.turkish.repo = v;
    }
    if let Some(v) = get("DUYGU_EN_MODEL") {
        settings.models.english.repo = v;
    }
    if let Some(v) = get("DUYGU_TR_REVISION") {
        settings.models.turkish.revision = Some(v);
    }
    if let Some(v) = get("DUYGU_EN_REVISION") {
        settings.models.english.revision = Some(v);
    }
    // An endpoint only makes sense for the http backend.
    if let Some(v) = get("DUYGU_TR_ENDPOINT") {
        settings.models.turkish.endpoint = Some(v);
        settings.models.turkish.backend = ModelBackend::Http;
    }
    if let Some(v) = get("DUYGU_EN_ENDPOINT") {
        settings.models.english.endpoint = Some(v);
        settings.models.english.backend = ModelBackend::Http;
    }
    if let Some(v) = get("DUYGU_API_TOKEN") {
        let _ = settings.models.turkish.api_token.get_or_insert_with(|| v.clone());
        let _ = settings.models.english.api_token.get_or_insert(v);
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env var, ignoring");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
