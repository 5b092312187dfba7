use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory under the user's home that holds `config.json`.
pub const CONFIG_DIR_NAME: &str = "stringlens";

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    const fn default_port() -> u16 {
        3000
    }

    /// `host:port`, suitable for binding a listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default tracing filter, used when `RUST_LOG` is not set.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/stringlens/config.json`, falling back to defaults when the
    /// file does not exist.
    ///
    /// Runs before logging is initialized, so it does not log; environment
    /// overrides are applied separately with [`Config::apply_env`].
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn apply_env(self) -> Self {
        let port = std::env::var(PORT_ENV).ok();
        if port.is_some() {
            info!("Applying {PORT_ENV} override");
        }
        self.with_port_override(port.as_deref())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Apply a port override such as the value of `PORT`. Unparseable
    /// values are ignored with a warning.
    #[must_use]
    pub fn with_port_override(mut self, port: Option<&str>) -> Self {
        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring {PORT_ENV}={raw:?}: {e}"),
            }
        }
        self
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - server.host: Address to bind the HTTP server to");
        println!("   - server.port: Port to listen on (overridden by ${PORT_ENV})");
        println!("   - logging.level: Log filter when RUST_LOG is not set");
        println!();
        Ok(config_path)
    }
}
