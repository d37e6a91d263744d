use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;
pub const CONFIG_FILE_NAME: &str = "catalog.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// The service pages; changing page refetches.
    #[default]
    Server,
    /// Everything is fetched once and the filtered view is paged locally.
    Client,
}

impl PaginationMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "server" => Some(Self::Server),
            "client" | "local" => Some(Self::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub items_per_page: u32,
    pub pagination: PaginationMode,
    pub session_file: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            pagination: PaginationMode::Server,
            session_file: None,
            request_timeout: None,
        }
    }
}

impl Settings {
    pub fn api_base(&self) -> anyhow::Result<Url> {
        normalize_api_url(&self.api_url)
    }
}

/// Defaults, then `catalog.toml` in the working directory (or `path`), then
/// environment overrides.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, &file_cfg),
            Err(err) => tracing::warn!(path = %path.display(), %err, "ignoring unreadable config file"),
        }
    }

    apply_env_settings(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("api_url").and_then(toml::Value::as_str) {
        settings.api_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("items_per_page").and_then(toml::Value::as_integer) {
        if let Ok(v) = u32::try_from(v) {
            settings.items_per_page = v.max(1);
        }
    }
    if let Some(v) = file_cfg
        .get("pagination")
        .and_then(toml::Value::as_str)
        .and_then(PaginationMode::parse)
    {
        settings.pagination = v;
    }
    if let Some(v) = file_cfg.get("session_file").and_then(toml::Value::as_str) {
        settings.session_file = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        if let Ok(v) = u64::try_from(v) {
            settings.request_timeout = Some(Duration::from_secs(v));
        }
    }
}

pub(crate) fn apply_env_settings(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("CATALOG_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__ITEMS_PER_PAGE") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.items_per_page = parsed.max(1);
        }
    }

    if let Some(v) = env("APP__PAGINATION").as_deref().and_then(PaginationMode::parse) {
        settings.pagination = v;
    }

    if let Some(v) = env("CATALOG_SESSION_FILE") {
        settings.session_file = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout = Some(Duration::from_secs(parsed));
        }
    }
}

/// Parses the base URL and makes sure it ends with a slash so relative
/// endpoint joins keep any path prefix.
pub fn normalize_api_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_API_URL } else { raw };
    let mut url = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
    if url.cannot_be_a_base() {
        return Err(anyhow!("api url '{raw}' cannot be used as a base"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Default session file: `<data dir>/catalog/session.json`.
pub fn default_session_file() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?;
    Ok(base.join("catalog").join("session.json"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
