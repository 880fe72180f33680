//! Hourly rate lookup.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RateTable;
use crate::models::{PersonKey, RateSource};

/// Default hourly rate of the reference configuration.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

/// The result of a rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLookupResult {
    /// The hourly rate to apply.
    pub rate: Decimal,
    /// Whether it came from a per-person entry or the default.
    pub source: RateSource,
}

/// Looks up a person's hourly rate.
///
/// Names match case-insensitively; when no entry exists the table's
/// default rate is used.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::{lookup_rate, DEFAULT_HOURLY_RATE};
/// use timesheet_payroll::config::RateTable;
/// use timesheet_payroll::models::{PersonKey, RateSource};
///
/// let table = RateTable::new(DEFAULT_HOURLY_RATE);
/// let result = lookup_rate(&PersonKey::new("Jane", "Doe"), &table);
/// assert_eq!(result.rate, DEFAULT_HOURLY_RATE);
/// assert_eq!(result.source, RateSource::Default);
/// ```
pub fn lookup_rate(person: &PersonKey, rates: &RateTable) -> RateLookupResult {
    match rates.get(person) {
        Some(rate) => RateLookupResult {
            rate,
            source: RateSource::Configured,
        },
        None => {
            debug!(person = %person, rate = %rates.default_rate(), "Using default hourly rate");
            RateLookupResult {
                rate: rates.default_rate(),
                source: RateSource::Default,
            }
        }
    }
}
