use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use config::{Config, ConfigError};
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Store API root, e.g. `https://api.bricklink.com/api/store/v1`.
    pub base_url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(config::File::with_name("config/default"))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path.as_ref()))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build()?;

        if let Ok(headers) = config.get_table("api.headers") {
            debug!(
                header_count = headers.len(),
                "Loaded API headers from configuration"
            );
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            headers = ?settings.api.headers.keys().collect::<Vec<_>>(),
            "Parsed API settings"
        );

        Ok(settings)
    }
}
