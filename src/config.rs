use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::SUMMARY_MAX_TOKENS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion service (server-side proxy) used to extract actions
    pub summarizer: SummarizerConfig,
    /// Remote task service receiving synced records
    pub sync: SyncConfig,
    /// Desktop notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Chat-completions URL of the proxy that holds the provider key
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_summarizer_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_summarizer_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_summarizer_timeout_secs(),
        }
    }
}

impl SummarizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the task service; records go to `{base_url}/api/subjects`
    pub base_url: String,
    #[serde(default = "default_sync_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: default_sync_base_url(),
            timeout_secs: default_sync_timeout_secs(),
        }
    }
}

impl SyncConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Show a desktop notification with the sync outcome
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_summarizer_endpoint() -> String {
    "http://127.0.0.1:8787/v1/chat/completions".to_string()
}

fn default_sync_base_url() -> String {
    "http://127.0.0.1:5215".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    SUMMARY_MAX_TOKENS
}

fn default_summarizer_timeout_secs() -> u64 {
    60
}

fn default_sync_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailtasks");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at {}\n\
                 Run 'mailtasks init' or create one. Example:\n\n\
                 [summarizer]\n\
                 endpoint = \"http://127.0.0.1:8787/v1/chat/completions\"\n\n\
                 [sync]\n\
                 base_url = \"https://tasks.example.com\"",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Full URL records are posted to
    pub fn sync_url(&self) -> String {
        format!(
            "{}{}",
            self.sync.base_url.trim_end_matches('/'),
            crate::constants::SYNC_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml = r#"
            [summarizer]
            endpoint = "http://proxy.local/v1/chat/completions"

            [sync]
            base_url = "https://tasks.example.com"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.summarizer.endpoint,
            "http://proxy.local/v1/chat/completions"
        );
        assert_eq!(config.summarizer.model, "gpt-3.5-turbo");
        assert_eq!(config.summarizer.max_tokens, 1000);
        assert_eq!(config.sync.timeout_secs, 30);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [summarizer]
            endpoint = "http://proxy.local/complete"
            model = "gpt-4"
            temperature = 0.7
            max_tokens = 500
            timeout_secs = 5

            [sync]
            base_url = "https://tasks.example.com/"
            timeout_secs = 10

            [notifications]
            enabled = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.summarizer.model, "gpt-4");
        assert_eq!(config.summarizer.max_tokens, 500);
        assert_eq!(config.summarizer.timeout(), Duration::from_secs(5));
        assert_eq!(config.sync.timeout(), Duration::from_secs(10));
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_sync_url_joins_base_and_path() {
        let mut config = Config::default();
        config.sync.base_url = "https://tasks.example.com/".to_string();
        assert_eq!(config.sync_url(), "https://tasks.example.com/api/subjects");

        config.sync.base_url = "https://tasks.example.com".to_string();
        assert_eq!(config.sync_url(), "https://tasks.example.com/api/subjects");
    }

    #[test]
    fn test_missing_sync_section_is_an_error() {
        let toml = r#"
            [summarizer]
            endpoint = "http://proxy.local/complete"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.summarizer.model = "local-model".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.summarizer.model, "local-model");
        assert_eq!(loaded.sync.base_url, config.sync.base_url);
    }

    #[test]
    fn test_load_missing_file_explains_setup() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("mailtasks init"));
    }
}
