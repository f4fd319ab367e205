use serde::Deserialize;

use crate::models::DeviceId;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub power_meter: PowerMeterConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PowerMeterConfig {
    /// Grid meter device. When unset, the seeded Grid Power Meter is used.
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    #[serde(default = "default_power_sensor_type")]
    pub sensor_type: String,
}

impl Default for PowerMeterConfig {
    fn default() -> Self {
        Self {
            device_id: None,
            sensor_type: default_power_sensor_type(),
        }
    }
}

fn default_power_sensor_type() -> String {
    crate::models::ENERGY_CONSUMPTION_SENSOR.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Seed the catalogue and the demo house on startup (skipped when a house exists).
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

fn default_seed() -> bool {
    true
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            !self.power_meter.sensor_type.trim().is_empty(),
            "power_meter.sensor_type must be non-empty"
        );
        Ok(())
    }
}
