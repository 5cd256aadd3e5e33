use std::path::{Path, PathBuf};

use ams_core::server::ServerConfig;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables overriding the configuration, for
/// example `AMS__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "AMS__";

/// Application configuration, layered as defaults, YAML file, environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: HttpConfig,
    pub api: ServerConfig,
    pub logging: LoggingConfig,
    /// YAML file with the objects loaded at startup.
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub bind_addr: String,
    /// Requests taking longer are answered with 504.
    pub timeout_secs: u64,
    /// Username reported by `current_account`. The first account when unset.
    pub current_username: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_owned(),
            timeout_secs: 30,
            current_username: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads the configuration. An explicit `path` must exist.
    ///
    /// # Errors
    /// Fails when the file is missing or unreadable, or when a value has the
    /// wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .extract()
            .context("invalid configuration")
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Raises the log level by one step per `-v`.
    pub fn apply_verbosity(&mut self, verbose: u8) {
        let level = match verbose {
            0 => return,
            1 => "debug",
            _ => "trace",
        };
        self.logging.level = level.to_owned();
    }

    /// Pretty JSON rendering used by `--print-config` and `check`.
    ///
    /// # Errors
    /// Returns the serializer error.
    pub fn to_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
