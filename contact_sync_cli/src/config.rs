//! Layered CLI configuration
//!
//! Defaults, then the TOML file, then `CONTACT_SYNC_` environment variables
//! (nested keys split on `__`, e.g. `CONTACT_SYNC_ORDERS__BATCH_LIMIT`).

use crate::paths;
use anyhow::{Context, Result};
use contact_sync_core::{MarkImportedPolicy, StaticWebsiteDirectory, Website};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "CONTACT_SYNC_";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub orders: OrdersConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub websites: Vec<Website>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OrdersConfig {
    /// Maximum number of orders collected per `order-sync` run
    pub batch_limit: usize,
    /// Stamp orders as imported even when their website failed to queue
    pub mark_failed_as_imported: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub color_enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: paths::get_database_path(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: paths::get_export_dir(),
        }
    }
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            batch_limit: 100,
            mark_failed_as_imported: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Which orders the batch processor stamps as imported
    pub fn mark_imported_policy(&self) -> MarkImportedPolicy {
        if self.orders.mark_failed_as_imported {
            MarkImportedPolicy::Always
        } else {
            MarkImportedPolicy::OnlyQueued
        }
    }

    /// Build the website directory from the `[[websites]]` tables
    pub fn website_directory(&self) -> Result<StaticWebsiteDirectory> {
        StaticWebsiteDirectory::new(self.websites.clone())
            .context("Invalid [[websites]] configuration")
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with the default configuration path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_config_path() -> PathBuf {
        // XDG_CONFIG_HOME wins on Linux and macOS
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("contact-sync/config.toml");
        }

        paths::get_config_dir().join("config.toml")
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    ///
    /// Only the key is written to the file; defaults stay implicit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };

        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        let toml::Value::Table(table) = current else {
            anyhow::bail!("Cannot set value on non-table");
        };
        table.insert(last.to_string(), parse_config_value(key, value)?);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;

        Ok(())
    }

    /// List all simple configuration values, sorted by key
    ///
    /// `[[websites]]` tables are arrays and are not listed.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }
}

fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_values(val, new_prefix, items);
            }
        }
        toml::Value::String(s) => items.push((prefix, s.clone())),
        toml::Value::Integer(i) => items.push((prefix, i.to_string())),
        toml::Value::Float(f) => items.push((prefix, f.to_string())),
        toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
        _ => {}
    }
}

fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "orders.batch_limit" => {
            let limit: usize = value
                .parse()
                .context("batch_limit must be a positive integer")?;
            if limit == 0 {
                anyhow::bail!("batch_limit must be greater than 0");
            }
        }
        "orders.mark_failed_as_imported" | "output.color_enabled" => {
            let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
        }
        "database.path" | "export.directory" => {
            if value.trim().is_empty() {
                anyhow::bail!("{key} must not be empty");
            }
        }
        k if k == "websites" || k.starts_with("websites.") => {
            anyhow::bail!("Websites are configured as [[websites]] tables in the config file");
        }
        _ => {}
    }
    Ok(())
}

fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
    match key {
        k if k.ends_with("_limit") => {
            let num: i64 = value.parse().context("Expected integer value")?;
            Ok(toml::Value::Integer(num))
        }
        k if k.ends_with("_enabled") || k.ends_with("_as_imported") => {
            let bool_val: bool = value
                .parse()
                .context("Expected boolean value (true/false)")?;
            Ok(toml::Value::Boolean(bool_val))
        }
        "database.path" | "export.directory" => Ok(toml::Value::String(value.to_string())),
        _ => {
            if let Ok(b) = value.parse::<bool>() {
                Ok(toml::Value::Boolean(b))
            } else if let Ok(i) = value.parse::<i64>() {
                Ok(toml::Value::Integer(i))
            } else if let Ok(f) = value.parse::<f64>() {
                Ok(toml::Value::Float(f))
            } else {
                Ok(toml::Value::String(value.to_string()))
            }
        }
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.orders.batch_limit, 100);
        assert!(config.orders.mark_failed_as_imported);
        assert_eq!(config.mark_imported_policy(), MarkImportedPolicy::Always);
        assert!(config.websites.is_empty());
    }

    #[test]
    fn test_policy_follows_flag() {
        let mut config = AppConfig::default();
        config.orders.mark_failed_as_imported = false;
        assert_eq!(config.mark_imported_policy(), MarkImportedPolicy::OnlyQueued);
    }

    #[test]
    fn test_validation() {
        assert!(validate_config_value("orders.batch_limit", "0").is_err());
        assert!(validate_config_value("orders.batch_limit", "abc").is_err());
        assert!(validate_config_value("orders.batch_limit", "25").is_ok());
        assert!(validate_config_value("output.color_enabled", "maybe").is_err());
        assert!(validate_config_value("websites.code", "base").is_err());
    }

    #[test]
    fn test_parse_types() {
        assert_eq!(
            parse_config_value("orders.batch_limit", "25").unwrap(),
            toml::Value::Integer(25)
        );
        assert_eq!(
            parse_config_value("orders.mark_failed_as_imported", "false").unwrap(),
            toml::Value::Boolean(false)
        );
        assert_eq!(
            parse_config_value("export.directory", "123").unwrap(),
            toml::Value::String("123".to_string())
        );
    }
}
