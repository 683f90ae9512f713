use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the configured backend URL
pub const BASE_URL_ENV: &str = "ASKBOT_BASE_URL";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend host; requests go to `{base_url}/ask`
    pub base_url: String,

    /// Upper bound on a single `/ask` exchange, in seconds
    pub request_timeout_secs: u64,

    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,

    /// UI preferences
    pub ui: UiConfig,

    /// Askbot home directory
    #[serde(skip)]
    pub askbot_home: PathBuf,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Company Chatbot".to_string(),
            placeholder: "Type your message...".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));

        Config {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            log_filter: "askbot=info".to_string(),
            ui: UiConfig::default(),
            askbot_home: home.join(".askbot"),
        }
    }
}

impl Config {
    /// Load configuration from `~/.askbot/config.toml` and the environment
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let mut config = Self::load_from(&home.join(".askbot"))?;
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from a specific askbot home directory.
    /// A missing file yields the defaults.
    pub fn load_from(askbot_home: &Path) -> Result<Self> {
        let config_path = askbot_home.join("config.toml");

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.askbot_home = askbot_home.to_path_buf();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.askbot_home)
            .context("Failed to create .askbot directory")?;

        let content = self.to_toml()?;
        fs::write(self.config_path(), content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn config_path(&self) -> PathBuf {
        self.askbot_home.join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.askbot_home.join("askbot.log")
    }

    /// Replace the base URL when an override is present and non-blank
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Full URL of the ask endpoint
    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url.trim_end_matches('/'))
    }
}
