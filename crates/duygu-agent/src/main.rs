//! # duygu-agent
//!
//! Duygu server binary: loads settings and both sentiment models, then
//! serves the prediction API and HTML form until Ctrl-C / SIGTERM.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use duygu_settings::{DuyguSettings, LogLevel};
use duygu_server::{DuyguServer, ServerConfig};

/// Duygu sentiment analysis server.
#[derive(Parser, Debug)]
#[command(name = "duygu", about = "Turkish/English sentiment analysis server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings, 0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Settings file (default `~/.duygu/settings.json`).
    #[arg(long, env = "DUYGU_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (overrides settings).
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,
}

fn parse_log_level(val: &str) -> std::result::Result<LogLevel, String> {
    LogLevel::parse(val).ok_or_else(|| format!("unknown log level: {val}"))
}

impl Cli {
    /// Load settings from the chosen file, then apply CLI overrides.
    fn load_settings(&self) -> Result<DuyguSettings> {
        let mut settings = match &self.settings {
            Some(path) => duygu_settings::load_settings_from_path(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => duygu_settings::load_settings().context("Failed to load settings")?,
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut DuyguSettings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(level) = self.log_level {
            settings.logging.level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    duygu_logging::init(&settings.logging);
    duygu_settings::init_settings(settings.clone());

    let metrics_handle = duygu_server::metrics::install_recorder()
        .context("Failed to install metrics recorder")?;

    tracing::info!(
        tr = %settings.models.turkish.repo,
        en = %settings.models.english.repo,
        "loading sentiment models"
    );
    let analyzer = duygu_classifier::build_analyzer(&settings.models)
        .await
        .context("Failed to load sentiment models")?;

    let server = DuyguServer::new(ServerConfig::from(&settings.server), analyzer, metrics_handle);
    let (tr, en) = server.analyzer().describe();
    tracing::info!(tr = %tr, en = %en, "sentiment models ready");
    let listener = server
        .bind()
        .await
        .with_context(|| format!("Failed to bind {}", server.config().bind_addr()))?;

    let coordinator = server.shutdown().clone();
    let _signal_task = tokio::spawn(async move {
        duygu_server::wait_for_signal().await;
        tracing::info!("Shutting down...");
        coordinator.shutdown();
    });

    server
        .serve(listener, server.shutdown().token())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_are_none() {
        let cli = Cli::parse_from(["duygu"]);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn cli_custom_port() {
        let cli = Cli::parse_from(["duygu", "--port", "8080"]);
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn cli_log_level_parsed() {
        let cli = Cli::parse_from(["duygu", "--log-level", "WARNING"]);
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
    }

    #[test]
    fn cli_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["duygu", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn cli_rejects_bad_port() {
        assert!(Cli::try_parse_from(["duygu", "--port", "99999"]).is_err());
    }

    #[test]
    fn overrides_apply_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"server": {"host": "10.0.0.5", "port": 9000}}"#).unwrap();

        let cli = Cli::parse_from([
            "duygu",
            "--settings",
            path.to_str().unwrap(),
            "--port",
            "7000",
            "--log-level",
            "debug",
        ]);
        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.server.host, "10.0.0.5");
        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.logging.level, LogLevel::Debug);
    }

    #[test]
    fn invalid_settings_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{broken").unwrap();
        let cli = Cli::parse_from(["duygu", "--settings", path.to_str().unwrap()]);
        let err = cli.load_settings().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load settings"));
    }

    #[test]
    fn server_config_from_settings() {
        let settings = DuyguSettings::default();
        let cfg = ServerConfig::from(&settings.server);
        assert_eq!(cfg.port, 7860);
        assert_eq!(cfg.host, "0.0.0.0");
    }
}
