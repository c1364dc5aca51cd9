//! Layered application configuration.
//!
//! Sources are merged in order: built-in defaults, the YAML file (if any),
//! `APP__*` environment variables, then command-line overrides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result, bail};
use calculator::CalculatorConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variables with this prefix override file values; `__`
/// separates nesting levels, e.g. `APP__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub modules: ModulesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8087,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset, e.g. `info` or
    /// `calculator=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesConfig {
    pub calculator: CalculatorConfig,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
}

impl AppConfig {
    /// Load defaults, then `path`, then the environment.
    ///
    /// # Errors
    /// Returns an error when `path` does not point at a file or when any
    /// source fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        let level = match cli.verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind_addr, self.server.port)
    }

    /// # Errors
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.server.port, 8087);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.modules.calculator, CalculatorConfig::default());
    }

    #[test]
    fn yaml_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
server:
  bind_addr: "0.0.0.0"
  port: 9100
logging:
  format: json
modules:
  calculator:
    max_sessions: 5
    session_idle_timeout: 10m
"#,
        );

        let config = AppConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9100");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.modules.calculator.max_sessions, 5);
        assert_eq!(
            config.modules.calculator.session_idle_timeout,
            Duration::from_secs(600)
        );
        assert_eq!(config.modules.calculator.max_display_length, 32);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_or_default(Some(Path::new("/nonexistent/app.yaml")))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "server:\n  prot: 1\n");
        assert!(AppConfig::load_or_default(Some(&path)).is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            port: Some(1234),
            verbose: 2,
        });
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.logging.level, "debug");

        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn yaml_dump_is_reloadable() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &yaml);
        let reloaded = AppConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(reloaded, AppConfig::default());
    }
}
