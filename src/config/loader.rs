//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};

use super::types::{RateTable, RatesConfig, Settings};

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/nctt/
/// ├── settings.yaml  # Organization, event log path, notifier
/// └── rates.yaml     # Default and per-person hourly rates
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nctt")?;
/// println!("Default rate: {}", loader.rates().default_rate());
/// # Ok::<(), timesheet_payroll::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    rates: RateTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or declares a negative rate.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;

        let rates_path = path.join("rates.yaml");
        let rates_config = Self::load_yaml::<RatesConfig>(&rates_path)?;
        Self::check_rates(&rates_path, &rates_config)?;

        Ok(Self {
            settings,
            rates: rates_config.into(),
        })
    }

    /// Builds a loader from already-constructed parts.
    pub fn from_parts(settings: Settings, rates: RateTable) -> Self {
        Self { settings, rates }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_rates(path: &Path, config: &RatesConfig) -> PayrollResult<()> {
        let negative = |rate: Decimal| rate < Decimal::ZERO;

        if negative(config.default_rate) {
            return Err(PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("default_rate must not be negative: {}", config.default_rate),
            });
        }

        if let Some(entry) = config.rates.iter().find(|e| negative(e.hourly)) {
            return Err(PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "rate for {} {} must not be negative: {}",
                    entry.first_name, entry.last_name, entry.hourly
                ),
            });
        }

        Ok(())
    }

    /// Returns the application settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}
