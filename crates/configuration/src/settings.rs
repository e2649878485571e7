use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the API service listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Which record store the API service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StoreBackend {
    /// A PostgreSQL database holding one JSONB document per student.
    Postgres,
    /// A process-local collection. Contents are lost on restart.
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Connection string. Falls back to `DATABASE_URL` when unset.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Resolves the connection string, reading `.env` if the value has to come
    /// from the environment.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_ref().filter(|url| !url.is_empty()) {
            return Ok(url.clone());
        }
        dotenvy::dotenv().ok();
        env::var("DATABASE_URL").map_err(|_| {
            ConfigError::ValidationError("database.url or DATABASE_URL must be set for the postgres backend".to_string())
        })
    }
}

/// Settings for the console's HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. "info" or "web_server=debug,info".
    #[serde(default = "default_filter")]
    pub filter: String,
    /// When set, logs are written to a daily rolling file in this directory
    /// instead of stderr.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            directory: None,
        }
    }
}
