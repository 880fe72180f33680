//! CSV-backed event store.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{LegacyRow, RawRow};

use super::EventStore;

/// Column headers of the current layout.
pub const CURRENT_HEADERS: [&str; 6] = ["First Name", "Last Name", "Action", "Date", "Time", "IP"];

/// The layout a log file was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLayout {
    /// `First Name, Last Name, Action, Date, Time, IP`.
    Current,
    /// `Name, Action, Date, Time`.
    Legacy,
}

/// An event log kept in a single CSV file.
///
/// The file is read in full on every load and rewritten in full on every
/// append. Rewrites go to a sibling temporary file that is then renamed
/// over the log. A missing file is an empty log.
///
/// # Example
///
/// ```no_run
/// use timesheet_payroll::store::{CsvEventStore, EventStore};
///
/// let store = CsvEventStore::new("timesheet.csv");
/// let rows = store.load_rows()?;
/// println!("{} rows", rows.len());
/// # Ok::<(), timesheet_payroll::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvEventStore {
    path: PathBuf,
}

impl CsvEventStore {
    /// Creates a store for the file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, message: impl ToString) -> PayrollError {
        PayrollError::StoreRead {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn write_error(&self, message: impl ToString) -> PayrollError {
        PayrollError::StoreWrite {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Reads the file and reports which layout it is in.
    ///
    /// Legacy rows are upgraded to the current layout in memory; the file is
    /// left untouched. Fields that are not valid UTF-8 are decoded lossily,
    /// so one damaged row never hides the rest of the log.
    pub fn load_with_layout(&self) -> PayrollResult<(Vec<RawRow>, LogLayout)> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Event log not found, starting empty");
            return Ok((Vec::new(), LogLayout::Current));
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let headers = reader.byte_headers().map_err(|e| self.read_error(e))?.clone();
        let headers = StringRecord::from_byte_record_lossy(headers);
        let has = |name: &str| headers.iter().any(|h| h == name);

        if has("Name") && !has("First Name") {
            let rows: Vec<RawRow> = self
                .read_records::<LegacyRow>(&mut reader, &headers)?
                .into_iter()
                .map(RawRow::from_legacy)
                .collect();
            info!(path = %self.path.display(), rows = rows.len(), "Migrated legacy event log rows");
            return Ok((rows, LogLayout::Legacy));
        }

        let rows = self.read_records::<RawRow>(&mut reader, &headers)?;
        Ok((rows, LogLayout::Current))
    }

    /// Reads every data record as `T`.
    ///
    /// A record that cannot be mapped onto `T` is kept as `T::default()` so
    /// the rows after it keep their positions.
    fn read_records<T>(
        &self,
        reader: &mut Reader<File>,
        headers: &StringRecord,
    ) -> PayrollResult<Vec<T>>
    where
        T: DeserializeOwned + Default,
    {
        let mut rows = Vec::new();
        for (index, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|e| self.read_error(e))?;
            let record = StringRecord::from_byte_record_lossy(record);
            let row = record.deserialize::<T>(Some(headers)).unwrap_or_else(|err| {
                warn!(
                    path = %self.path.display(),
                    row = index + 1,
                    error = %err,
                    "Unreadable event log row kept as blank"
                );
                T::default()
            });
            rows.push(row);
        }
        Ok(rows)
    }

    /// Rewrites the whole file with `rows` in the current layout.
    pub fn save_rows(&self, rows: &[RawRow]) -> PayrollResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .map_err(|e| self.write_error(e))?;
        writer
            .write_record(CURRENT_HEADERS)
            .map_err(|e| self.write_error(e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| self.write_error(e))?;
        }
        writer.flush().map_err(|e| self.write_error(e))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.write_error(e))
    }
}

impl EventStore for CsvEventStore {
    fn load_rows(&self) -> PayrollResult<Vec<RawRow>> {
        self.load_with_layout().map(|(rows, _)| rows)
    }

    fn append(&self, row: RawRow) -> PayrollResult<()> {
        let mut rows = self.load_rows()?;
        rows.push(row);
        self.save_rows(&rows)?;
        debug!(path = %self.path.display(), rows = rows.len(), "Event log rewritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(first: &str, action: &str, time: &str) -> RawRow {
        RawRow {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            action: action.to_string(),
            date: "2024-06-03".to_string(),
            time: time.to_string(),
            ip: String::new(),
        }
    }

    fn store_in(dir: &TempDir) -> CsvEventStore {
        CsvEventStore::new(dir.path().join("timesheet.csv"))
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_rows().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.append(row("Jane", "Sign In", "08:00:00 AM")).unwrap();
        store.append(row("Jane", "Sign Out", "05:00:00 PM")).unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows, vec![
            row("Jane", "Sign In", "08:00:00 AM"),
            row("Jane", "Sign Out", "05:00:00 PM"),
        ]);
    }

    #[test]
    fn test_written_file_has_current_headers() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut first = row("Jane", "Sign In", "08:00:00 AM");
        first.ip = "10.0.0.7".to_string();
        store.append(first).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("First Name,Last Name,Action,Date,Time,IP"));
        assert_eq!(
            lines.next(),
            Some("Jane,Doe,Sign In,2024-06-03,08:00:00 AM,10.0.0.7")
        );
        assert!(!dir.path().join("timesheet.csv.tmp").exists());
    }

    #[test]
    fn test_legacy_file_is_migrated_on_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Name,Action,Date,Time\nJane Doe,Sign In,2024-06-03,08:00:00 AM\nCher,Sign Out,2024-06-03,05:00:00 PM\n",
        )
        .unwrap();

        let (rows, layout) = store.load_with_layout().unwrap();
        assert_eq!(layout, LogLayout::Legacy);
        assert_eq!(rows[0].first_name, "Jane");
        assert_eq!(rows[0].last_name, "Doe");
        assert_eq!(rows[1].first_name, "Cher");
        assert_eq!(rows[1].last_name, "");
        assert_eq!(rows[1].action, "Sign Out");
    }

    #[test]
    fn test_append_to_legacy_file_rewrites_current_layout() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Name,Action,Date,Time\nJane Doe,Sign In,2024-06-03,08:00:00 AM\n",
        )
        .unwrap();

        store.append(row("Jane", "Sign Out", "05:00:00 PM")).unwrap();

        let (rows, layout) = store.load_with_layout().unwrap();
        assert_eq!(layout, LogLayout::Current);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].last_name, "Doe");
    }

    #[test]
    fn test_non_utf8_row_does_not_break_the_log() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut content = b"First Name,Last Name,Action,Date,Time,IP\n".to_vec();
        content.extend_from_slice(b"Jane,Doe,Sign In,2024-06-03,08:00:00 AM,\n");
        content.extend_from_slice(b"Jos\xe9,Diaz,Sign In,2024-06-03,09:00:00 AM,\n");
        fs::write(store.path(), content).unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row("Jane", "Sign In", "08:00:00 AM"));
        assert_eq!(rows[1].first_name, "Jos\u{FFFD}");
        assert_eq!(rows[1].last_name, "Diaz");

        store.append(row("Jane", "Sign Out", "05:00:00 PM")).unwrap();
        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].action, "Sign Out");
    }

    #[test]
    fn test_missing_ip_column_defaults_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "First Name,Last Name,Action,Date,Time\nJane,Doe,Sign In,2024-06-03,08:00:00 AM\n",
        )
        .unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip, "");
    }

    #[test]
    fn test_empty_fields_are_kept_for_display() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "First Name,Last Name,Action,Date,Time,IP\n,,Sign In,2024-06-03,08:00:00 AM,\n",
        )
        .unwrap();

        let rows = store.load_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_name, "");
    }
}
