//! TOML storage for the bot configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::migrate::migrate;
use crate::schema::Config;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw data tree as stored, without migration.
    pub fn read_raw(&self) -> Result<Value, ConfigError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Overwrite the file with `data`. Null entries are dropped since TOML has no null.
    pub fn write_raw(&self, data: &Value) -> Result<(), ConfigError> {
        let table = toml::Value::try_from(strip_nulls(data.clone()))?;
        let text = toml::to_string_pretty(&table)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "Config file written");
        Ok(())
    }

    /// Read, migrate (rewriting the file when the schema was outdated) and build the config.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let (data, migrated) = self.migrate()?;
        let config = Config::from_value(&data)?;
        info!(path = %self.path.display(), migrated, "Config loaded");
        Ok(config)
    }

    /// Migrate the stored data in place; returns the migrated tree and whether it changed.
    pub fn migrate(&self) -> Result<(Value, bool), ConfigError> {
        let (data, changed) = migrate(self.read_raw()?)?;
        if changed {
            self.write_raw(&data)?;
            info!(path = %self.path.display(), "Config file migrated to the current schema");
        }
        Ok((data, changed))
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.write_raw(&config.to_value()?)
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}
