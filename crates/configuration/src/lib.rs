use crate::error::ConfigError;
use crate::settings::Config;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ClientConfig, DatabaseConfig, LoggingConfig, ServerConfig, StoreBackend};

/// The file `load_config` reads when it exists.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration from `config.toml` and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads the application configuration from the given TOML file.
///
/// The file is optional; every setting has a default. Environment variables of
/// the form `PORTAL__SECTION__KEY` override values from the file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("PORTAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    if config.client.base_url.is_empty() {
        return Err(ConfigError::ValidationError("client.base_url must not be empty".to_string()));
    }

    Ok(config)
}
