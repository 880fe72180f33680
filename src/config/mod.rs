//! Configuration loading and management for the timesheet payroll engine.
//!
//! This module loads the application settings and the hourly rate table
//! from YAML files. Rates are injected into the aggregator rather than
//! compiled in, so tests can supply their own tables.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/nctt").unwrap();
//! println!("Loaded settings for: {}", config.settings().organization);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{NotifierSettings, RateEntry, RateTable, RatesConfig, Settings, StoreSettings};
