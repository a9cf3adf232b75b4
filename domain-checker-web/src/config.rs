//! Service configuration loaded from TOML with environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use domain_checker_core::WhoisOptions;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DOMAIN_CHECKER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub whois: WhoisConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhoisConfig {
    pub timeout_secs: u64,
    /// Registrar referral depth.
    pub follow: u16,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        let defaults = WhoisOptions::default();
        Self {
            timeout_secs: defaults.timeout.as_secs(),
            follow: defaults.follow,
        }
    }
}

impl WhoisConfig {
    pub fn options(&self) -> WhoisOptions {
        WhoisOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            follow: self.follow,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
    /// Write daily-rotated log files here instead of stdout.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load from `$DOMAIN_CHECKER_CONFIG`, else `./config.toml` if it exists,
    /// else defaults; then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        });

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse TOML config")
    }

    /// `PORT` overrides `server.port`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value {port:?}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.whois.timeout_secs, 10);
        assert_eq!(config.whois.follow, 2);
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert!(config.log.directory.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
[server]
port = 9090

[whois]
timeout_secs = 3

[log]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.whois.options().timeout, Duration::from_secs(3));
        assert_eq!(config.whois.follow, 2);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(AppConfig::from_toml("[server]\nport = \"not a port\"").is_err());
    }

    #[test]
    fn test_port_env_override() {
        let mut config = AppConfig::default();
        config
            .apply_env(|key| (key == "PORT").then(|| "3000".to_string()))
            .unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_bad_port_env_is_error() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_env(|_| Some("eighty".to_string()))
            .is_err());
    }
}
