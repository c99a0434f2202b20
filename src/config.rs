use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub webserver: WebserverConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Application credentials from my.telegram.org
    pub api_id: i32,
    pub api_hash: String,
    /// Base64 session export; used when no session file exists yet
    #[serde(default)]
    pub session_string: String,
    /// Path of the persisted session file (defaults under the data dir)
    #[serde(default)]
    pub session_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                api_id: 0,
                api_hash: String::new(),
                session_string: String::new(),
                session_file: String::new(),
            },
            webserver: WebserverConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            upload: UploadConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://tmpfiles.org".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let mut config: Config =
            toml::from_str(&content).with_context(|| format!("Invalid config file {}", path))?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write config file {}", path))
    }

    /// Environment variables win over the file so the service can run on
    /// platforms that only offer env-based configuration.
    ///
    /// Recognized: API_ID, API_HASH, SESSION_STRING, HOST, PORT.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_id) = std::env::var("API_ID") {
            if let Ok(parsed) = api_id.parse() {
                self.telegram.api_id = parsed;
            }
        }
        if let Ok(api_hash) = std::env::var("API_HASH") {
            self.telegram.api_hash = api_hash;
        }
        if let Ok(session) = std::env::var("SESSION_STRING") {
            self.telegram.session_string = session;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.webserver.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(parsed) = port.parse() {
                self.webserver.port = parsed;
            }
        }
    }

    /// Resolved session file path (config value or the default location)
    pub fn session_file_path(&self) -> std::path::PathBuf {
        if self.telegram.session_file.is_empty() {
            paths::get_session_path()
        } else {
            std::path::PathBuf::from(&self.telegram.session_file)
        }
    }

    /// Check the fields without which the Telegram client cannot start
    pub fn validate(&self) -> Result<(), String> {
        if self.telegram.api_id == 0 {
            return Err("telegram.api_id is not set (or API_ID env var)".to_string());
        }
        if self.telegram.api_hash.is_empty() {
            return Err("telegram.api_hash is not set (or API_HASH env var)".to_string());
        }
        Ok(())
    }
}

// Global config storage, loaded once at startup
static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Load the config file (default path) into the global slot
pub fn init_config() -> Result<Config> {
    let path = paths::get_config_path();
    let config = Config::load(&path.to_string_lossy())?;
    set_config(config.clone());
    Ok(config)
}

/// Snapshot of the current configuration
pub fn get_config() -> Config {
    CONFIG.read().map(|c| c.clone()).unwrap_or_default()
}

/// Replace the global configuration (startup and tests)
pub fn set_config(config: Config) {
    if let Ok(mut current) = CONFIG.write() {
        *current = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.webserver.host, "127.0.0.1");
        assert_eq!(parsed.webserver.port, 8080);
        assert_eq!(parsed.upload.base_url, "https://tmpfiles.org");
        assert!(parsed.upload.enabled);
    }

    #[test]
    fn upload_section_is_optional_in_file() {
        let text = r#"
            [telegram]
            api_id = 12345
            api_hash = "abc"

            [webserver]
            host = "0.0.0.0"
            port = 9000
        "#;
        let parsed: Config = toml::from_str(text).unwrap();
        assert_eq!(parsed.telegram.api_id, 12345);
        assert_eq!(parsed.upload.timeout_secs, 60);
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.telegram.api_id = 1;
        config.telegram.api_hash = "hash".to_string();
        assert!(config.validate().is_ok());
    }
}
