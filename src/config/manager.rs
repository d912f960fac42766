use super::{
    data::DataConfig,
    traits::ConfigSection,
    valuation::ValuationConfig,
};
use crate::error::DcfError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "DCFVIEW_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dcfview.toml";
const ENV_PREFIX: &str = "DCFVIEW";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub valuation: ValuationConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), DcfError> {
        self.valuation.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Resolve the config file: `DCFVIEW_CONFIG`, else `dcfview.toml` when it exists
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Layer defaults, the optional TOML file and `DCFVIEW_*` variables
    pub fn load(&self, path: Option<&Path>) -> Result<(), DcfError> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| DcfError::Configuration(format!("Failed to build defaults: {}", e)))?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = path {
            log::info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("valuation.growth_rates")
                .with_list_parse_key("valuation.discount_rates"),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DcfError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DcfError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DcfError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        self.load(Some(path))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DcfError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| DcfError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| DcfError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Apply `f` to a copy and keep it only if it validates
    pub fn update<F>(&self, f: F) -> Result<(), DcfError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dcfview.toml");

        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.valuation.horizon_years = 7;
                c.valuation.growth_rates = vec![0.03, 0.05];
                c.data.source = SourceKind::Csv;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        let config = reloaded.get();
        assert_eq!(config.valuation.horizon_years, 7);
        assert_eq!(config.valuation.growth_rates, vec![0.03, 0.05]);
        assert_eq!(config.data.source, SourceKind::Csv);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[valuation]\nterminal_growth = 0.025\n").unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.valuation.terminal_growth, 0.025);
        assert_eq!(config.valuation.horizon_years, 5);
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.valuation.horizon_years = 0);
        assert!(matches!(result, Err(DcfError::Configuration(_))));
        assert_eq!(manager.get().valuation.horizon_years, 5);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[valuation]\ntrailing_periods = 4\n").unwrap();

        // no other test reads trailing_periods
        std::env::set_var("DCFVIEW_VALUATION__TRAILING_PERIODS", "3");
        let manager = ConfigManager::new();
        let result = manager.load(Some(&path));
        std::env::remove_var("DCFVIEW_VALUATION__TRAILING_PERIODS");

        result.unwrap();
        assert_eq!(manager.get().valuation.trailing_periods, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let manager = ConfigManager::new();
        assert!(manager.load_from_file("/nonexistent/dcfview.toml").is_err());
    }

    #[test]
    fn test_empty_rate_list_rejected() {
        let mut config = AppConfig::default();
        config.valuation.discount_rates.clear();
        assert!(config.validate().is_err());
    }
}
