//! Configuration loader.
//!
//! ## Loading Strategy
//! 1. `.env` is loaded (if present) so credential fallbacks can live there
//! 2. `SHELFSYNC_CONFIG` names a config file explicitly
//! 3. Otherwise, standard paths are probed for `shelfsync.{toml,json}` or
//!    `config.{toml,json}`
//!
//! Both TOML and JSON are supported, detected by file extension.

use std::path::{Path, PathBuf};

use shelfsync_domain::{AppConfig, Result, ShelfsyncError};

/// Load configuration with the automatic fallback strategy.
///
/// # Errors
/// Returns `ShelfsyncError::Config` if no config file can be found or the
/// file fails to parse.
pub fn load() -> Result<AppConfig> {
    // Secrets referenced by the credential resolver may live in .env.
    dotenvy::dotenv().ok();

    if let Ok(path) = std::env::var("SHELFSYNC_CONFIG") {
        return load_from_file(Some(PathBuf::from(path)));
    }

    load_from_file(None)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `ShelfsyncError::Config` if the file is missing, has an
/// unsupported extension, or fails to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShelfsyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ShelfsyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ShelfsyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ShelfsyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ShelfsyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ShelfsyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// Searches the working directory and up to two parent directories for
/// `shelfsync.{toml,json}`, then `config.{toml,json}`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            for name in ["shelfsync.toml", "shelfsync.json", "config.toml", "config.json"] {
                candidates.push(dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}
