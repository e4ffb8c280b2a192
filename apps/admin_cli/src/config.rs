use std::{collections::HashMap, fs};

use anyhow::{anyhow, Context, Result};
use sync_core::SyncPolicy;

pub const CONFIG_FILE: &str = "campus.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub sync_policy: SyncPolicy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".into(),
            request_timeout_secs: 10,
            sync_policy: SyncPolicy::Refetch,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `campus.toml` in the working directory, then the environment.
pub fn load_settings() -> Result<Settings> {
    let raw = fs::read_to_string(CONFIG_FILE).ok();
    settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn settings_from(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)
            .with_context(|| format!("failed to parse {CONFIG_FILE}"))?;
        let file_cfg: HashMap<String, String> = file_cfg
            .into_iter()
            .map(|(key, value)| (key, plain_string(value)))
            .collect();

        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("request_timeout_secs") {
            settings.request_timeout_secs = parse_timeout(v)?;
        }
        if let Some(v) = file_cfg.get("sync_policy") {
            settings.sync_policy = v.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(v) = file_cfg.get("log_filter") {
            settings.log_filter = v.clone();
        }
    }

    if let Some(v) = env("CAMPUS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_timeout(&v)?;
    }

    if let Some(v) = env("APP__SYNC_POLICY") {
        settings.sync_policy = v
            .parse()
            .map_err(|e: String| anyhow!(e))
            .context("invalid APP__SYNC_POLICY")?;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn plain_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid request timeout '{raw}'"))?;
    if secs == 0 {
        return Err(anyhow!("request timeout must be at least one second"));
    }
    Ok(secs)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
