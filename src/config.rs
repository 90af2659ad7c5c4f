use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::DEFAULT_MAX_PARTICIPANTS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub presets: PresetSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_participants: default_max_participants(),
        }
    }
}

fn default_max_participants() -> usize { DEFAULT_MAX_PARTICIPANTS }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_ttl() -> u64 { 3600 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetSettings {
    /// Catalog file; the built-in catalog is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Formatter installed by `main`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STABLE_MATCH)
    /// 5. A bare PORT variable
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STABLE_MATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings = apply_port_override(settings, std::env::var("PORT").ok())?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("STABLE_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Platforms that inject a bare `PORT` expect the server to bind to it
fn apply_port_override(settings: Config, port: Option<String>) -> Result<Config, ConfigError> {
    match port {
        Some(port) => Config::builder()
            .add_source(settings)
            .set_override("server.port", port)?
            .build(),
        None => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.matching.max_participants, 8);
        assert_eq!(settings.sessions.ttl_secs, 3600);
        assert!(settings.presets.path.is_none());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Full);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::builder()
            .add_source(File::from_str(
                "[matching]\nmax_participants = 6\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.matching.max_participants, 6);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logging.format, LogFormat::Full);
    }

    #[test]
    fn test_log_format_parsing() {
        let config = Config::builder()
            .add_source(File::from_str("[logging]\nformat = \"pretty\"\n", FileFormat::Toml))
            .build()
            .unwrap();
        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.logging.format, LogFormat::Pretty);

        // No JSON formatter is compiled in
        let config = Config::builder()
            .add_source(File::from_str("[logging]\nformat = \"json\"\n", FileFormat::Toml))
            .build()
            .unwrap();
        assert!(config.try_deserialize::<Settings>().is_err());
    }

    #[test]
    fn test_port_override() {
        let config = Config::builder()
            .add_source(File::from_str("[server]\nport = 8080\n", FileFormat::Toml))
            .build()
            .unwrap();

        let config = apply_port_override(config, Some("9090".to_string())).unwrap();
        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.server.port, 9090);
    }
}
