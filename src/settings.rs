use serde::Deserialize;

use crate::types::SettingsError;

const CONFIG_FILE: &str = "restaurant";
const ENV_PREFIX: &str = "RESTAURANT";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantSettings {
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub restaurant: RestaurantSettings,
}

impl Settings {
    /// Defaults, then an optional `restaurant.toml`, then `RESTAURANT_*` variables
    /// (`RESTAURANT_SERVER__PORT=9000`).
    pub fn load() -> Result<Self, SettingsError> {
        let source = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(source)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self, SettingsError> {
        let settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("log.level", "info")?
            .set_default("restaurant.seed_sample_data", false)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
