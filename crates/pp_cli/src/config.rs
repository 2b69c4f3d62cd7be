//! CLI settings, read from the JSON file named by `PP_CONFIG_PATH`.

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "PP_CONFIG_PATH";

pub const DEFAULT_PORTAL_BASE_URL: &str = "https://picklepathway.com";

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// League snapshot used when `--snapshot` is not given.
    pub snapshot_path: Option<PathBuf>,
    /// Origin of the player portal printed on scoresheets.
    pub portal_base_url: String,
    /// IANA zone whose calendar date decides the current league week.
    pub time_zone: Tz,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
            time_zone: DEFAULT_TIME_ZONE,
        }
    }
}

impl CliConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: CliConfig = serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        config.portal_base_url = config.portal_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.portal_base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!("portal_base_url must be an http(s) URL, got '{url}'");
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load from `PP_CONFIG_PATH`, falling back to defaults when it is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_path_setting(env::var(CONFIG_PATH_ENV).ok())
    }

    fn from_path_setting(setting: Option<String>) -> Result<Self> {
        match setting.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Self::load(Path::new(path))
                .with_context(|| format!("Config from {CONFIG_PATH_ENV}='{path}'")),
            _ => Ok(Self::default()),
        }
    }

    /// Player portal link for a league.
    pub fn portal_url(&self, slug: &str) -> String {
        format!("{}/player/{}", self.portal_base_url, slug)
    }
}
