//! Durable event storage.
//!
//! The [`EventStore`] trait is the seam between the engine and wherever the
//! time-clock rows live. [`CsvEventStore`] keeps them in one CSV file and
//! upgrades the legacy single-name layout when it reads it.

mod csv_store;

pub use csv_store::{CURRENT_HEADERS, CsvEventStore, LogLayout};

use crate::error::PayrollResult;
use crate::models::RawRow;

/// Loads and appends rows of the event log.
///
/// Implementations do not arbitrate between concurrent writers; callers
/// that accept concurrent submissions serialize their appends.
pub trait EventStore: Send + Sync {
    /// Loads every row, in stored order, in the current layout.
    fn load_rows(&self) -> PayrollResult<Vec<RawRow>>;

    /// Appends one row.
    fn append(&self, row: RawRow) -> PayrollResult<()>;
}
