use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Labelled CSV used for training and evaluation. Default: search well-known paths.
    pub dataset_path: Option<PathBuf>,
    /// Role catalogue JSON. Default: the catalogue compiled into the binary.
    pub catalogue_path: Option<PathBuf>,
    /// Where the trained classifier is persisted and reloaded from.
    pub model_path: Option<PathBuf>,
    pub train_on_startup: bool,
    pub max_upload_bytes: usize,
    pub default_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            dataset_path: None,
            catalogue_path: None,
            model_path: None,
            train_on_startup: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_top_k: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            dataset_path: path("DATASET_PATH"),
            catalogue_path: path("CATALOGUE_PATH"),
            model_path: path("MODEL_PATH"),
            train_on_startup: match lookup("TRAIN_ON_STARTUP") {
                Some(v) => parse_bool(&v)
                    .with_context(|| format!("TRAIN_ON_STARTUP must be a boolean, got '{v}'"))?,
                None => defaults.train_on_startup,
            },
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            default_top_k: parse_or(&lookup, "DEFAULT_TOP_K", defaults.default_top_k)
                .and_then(|k| match k {
                    0 => Err(anyhow::anyhow!("DEFAULT_TOP_K cannot be 0")),
                    k => Ok(k),
                })
                .context("DEFAULT_TOP_K must be a positive integer")?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
