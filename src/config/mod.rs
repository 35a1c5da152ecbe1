//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geo-gateway/config.toml
//!
//! `HOST` and `PORT` from the environment (or a `.env` file) take precedence
//! over the file.

pub mod defaults;

use crate::constants::api::{IP_API_URL, NOMINATIM_URL, TIMEZONE_URL};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Base URL of the IP geolocation provider
    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,

    /// Base URL of the Nominatim instance used for forward and reverse geocoding
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Base URL of the timezone provider
    #[serde(default = "default_timezone_url")]
    pub timezone_url: String,

    /// Timezone identifier requested from the timezone provider
    #[serde(default = "default_timezone_zone")]
    pub timezone_zone: String,

    /// User-Agent header for outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound request timeout in seconds, 0 for none
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_ip_api_url() -> String {
    IP_API_URL.to_string()
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_timezone_url() -> String {
    TIMEZONE_URL.to_string()
}
fn default_timezone_zone() -> String {
    DEFAULT_TIMEZONE_ZONE.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            ip_api_url: default_ip_api_url(),
            nominatim_url: default_nominatim_url(),
            timezone_url: default_timezone_url(),
            timezone_zone: default_timezone_zone(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    /// Outbound request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Build the HTTP client shared by all upstream adapters
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load configuration and apply environment overrides
    ///
    /// Reads a `.env` file from the working directory first, if present.
    pub fn load_with_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`/`PORT` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV).filter(|p| !p.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid {} value: {}", PORT_ENV, port)))?;
        }
        Ok(())
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["providers", "ip_api_url"] => Some(self.providers.ip_api_url.clone()),
            ["providers", "nominatim_url"] => Some(self.providers.nominatim_url.clone()),
            ["providers", "timezone_url"] => Some(self.providers.timezone_url.clone()),
            ["providers", "timezone_zone"] => Some(self.providers.timezone_zone.clone()),
            ["providers", "user_agent"] => Some(self.providers.user_agent.clone()),
            ["providers", "timeout_secs"] => Some(self.providers.timeout_secs.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["providers", "ip_api_url"] => {
                self.providers.ip_api_url = value.to_string();
            }
            ["providers", "nominatim_url"] => {
                self.providers.nominatim_url = value.to_string();
            }
            ["providers", "timezone_url"] => {
                self.providers.timezone_url = value.to_string();
            }
            ["providers", "timezone_zone"] => {
                self.providers.timezone_zone = value.to_string();
            }
            ["providers", "user_agent"] => {
                self.providers.user_agent = value.to_string();
            }
            ["providers", "timeout_secs"] => {
                self.providers.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "providers.ip_api_url",
            "providers.nominatim_url",
            "providers.timezone_url",
            "providers.timezone_zone",
            "providers.user_agent",
            "providers.timeout_secs",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.providers.nominatim_url, NOMINATIM_URL);
        assert_eq!(config.providers.timezone_zone, "Etc/UTC");
        assert!(config.providers.timeout().is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("server.port"), Some("3000".to_string()));

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.server.port, 8080);

        config.set("providers.timezone_zone", "Europe/Paris").unwrap();
        assert_eq!(
            config.get("providers.timezone_zone"),
            Some("Europe/Paris".to_string())
        );
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("providers.timeout_secs", "-1").is_err());
    }

    #[test]
    fn test_timeout() {
        let mut config = Config::default();
        config.set("providers.timeout_secs", "5").unwrap();
        assert_eq!(config.providers.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [("HOST", "0.0.0.0"), ("PORT", "8081")].into();
        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_env_overrides_ignore_empty() {
        let mut config = Config::default();
        config
            .apply_overrides(|_| Some(String::new()))
            .unwrap();

        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_env_override_invalid_port() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "abc".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 9000;
        config.providers.timezone_zone = "Asia/Tokyo".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.providers.timezone_zone, "Asia/Tokyo");
    }

    #[test]
    fn test_load_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.providers.ip_api_url, IP_API_URL);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[providers]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"server.port"));
        assert!(keys.contains(&"providers.nominatim_url"));
        for key in keys {
            assert!(Config::default().get(key).is_some(), "missing getter for {}", key);
        }
    }
}
