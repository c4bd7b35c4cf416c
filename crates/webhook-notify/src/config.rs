use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "webhook-notify.toml";

/// Values read from `webhook-notify.toml`. Every key is optional; CLI
/// flags and environment variables take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub webhook_url: Option<String>,
    pub fields: Option<String>,
}

/// Effective settings for one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub fields: String,
}

impl FileConfig {
    /// Load configuration from an explicit path, or search upward from current dir.
    /// A missing file is only an error when the path was given explicitly.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let path = match path_override {
            Some(p) => p,
            None => match find_upwards(DEFAULT_CONFIG_NAME) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Parsing TOML config {}", path.display()))?;
        Ok(cfg)
    }
}

impl Settings {
    pub fn resolve(
        webhook_url: Option<String>,
        fields: Option<String>,
        file: FileConfig,
    ) -> Result<Self> {
        let webhook_url = trimmed_url(webhook_url).or(trimmed_url(file.webhook_url));
        let Some(webhook_url) = webhook_url else {
            bail!("webhook_url is not set (use --webhook-url, the webhook_url env var, or {DEFAULT_CONFIG_NAME})");
        };

        let fields = non_empty(fields).or(file.fields).unwrap_or_default();

        Ok(Self {
            webhook_url,
            fields,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn trimmed_url(value: Option<String>) -> Option<String> {
    non_empty(value.map(|url| url.trim().to_string()))
}

fn find_upwards(file_name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
