//! Configuration types for the timesheet payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the [`RateTable`]
//! built from them.

use std::collections::HashMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PersonKey;

/// One per-person hourly rate entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    /// First name, matched case-insensitively.
    pub first_name: String,
    /// Last name, matched case-insensitively.
    pub last_name: String,
    /// The hourly rate for this person.
    pub hourly: Decimal,
}

/// Rates configuration file structure (`rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Rate applied to anyone without an entry.
    pub default_rate: Decimal,
    /// Per-person overrides.
    #[serde(default)]
    pub rates: Vec<RateEntry>,
}

/// Event store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Path of the CSV event log.
    pub data_file: PathBuf,
}

/// Notifier settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifierSettings {
    /// Whether punches trigger a notification.
    #[serde(default)]
    pub enabled: bool,
    /// Sender address shown in notifications.
    #[serde(default)]
    pub sender: String,
    /// Recipient addresses.
    #[serde(default)]
    pub recipients: Vec<String>,
}

/// Application settings file structure (`settings.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Organization name used in notification subjects.
    pub organization: String,
    /// Event store settings.
    pub store: StoreSettings,
    /// Notifier settings.
    #[serde(default)]
    pub notifier: NotifierSettings,
}

/// Hourly rates keyed by lowercased person name, with a default.
///
/// Lookups ignore case and surrounding whitespace; identity elsewhere in
/// the engine stays case-sensitive.
///
/// # Example
///
/// ```
/// use timesheet_payroll::config::RateTable;
/// use timesheet_payroll::models::PersonKey;
/// use rust_decimal::Decimal;
///
/// let table = RateTable::new(Decimal::new(35, 0))
///     .with_rate("Meron", "Gebremichal", Decimal::new(22, 0));
///
/// assert_eq!(table.get(&PersonKey::new("meron", "GEBREMICHAL")), Some(Decimal::new(22, 0)));
/// assert_eq!(table.get(&PersonKey::new("Jane", "Doe")), None);
/// assert_eq!(table.default_rate(), Decimal::new(35, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    default_rate: Decimal,
    rates: HashMap<(String, String), Decimal>,
}

fn rate_key(first_name: &str, last_name: &str) -> (String, String) {
    (
        first_name.trim().to_lowercase(),
        last_name.trim().to_lowercase(),
    )
}

impl RateTable {
    /// Creates a table with only a default rate.
    pub fn new(default_rate: Decimal) -> Self {
        Self {
            default_rate,
            rates: HashMap::new(),
        }
    }

    /// Adds or replaces a per-person rate.
    pub fn with_rate(mut self, first_name: &str, last_name: &str, hourly: Decimal) -> Self {
        self.rates.insert(rate_key(first_name, last_name), hourly);
        self
    }

    /// Returns the configured rate for a person, if any.
    pub fn get(&self, person: &PersonKey) -> Option<Decimal> {
        self.rates
            .get(&rate_key(&person.first_name, &person.last_name))
            .copied()
    }

    /// Returns the default rate.
    pub fn default_rate(&self) -> Decimal {
        self.default_rate
    }

    /// Returns the number of per-person entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if there are no per-person entries.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<RatesConfig> for RateTable {
    /// Later entries for the same (case-folded) name replace earlier ones.
    fn from(config: RatesConfig) -> Self {
        config
            .rates
            .into_iter()
            .fold(RateTable::new(config.default_rate), |table, entry| {
                table.with_rate(&entry.first_name, &entry.last_name, entry.hourly)
            })
    }
}
