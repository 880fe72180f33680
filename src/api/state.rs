//! Application state for the timesheet payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::notify::{notifier_from_settings, Notifier};
use crate::store::{CsvEventStore, EventStore};
use crate::submission::PunchRecorder;

/// Shared application state.
///
/// Holds the loaded configuration and the punch recorder, which owns the
/// event store and serializes writes to it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// The append path, shared by every request.
    recorder: Arc<PunchRecorder>,
}

impl AppState {
    /// Creates state backed by the CSV store and notifier named in the
    /// configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let store = Arc::new(CsvEventStore::new(
            config.settings().store.data_file.clone(),
        ));
        let notifier = notifier_from_settings(&config.settings().notifier);
        Self::with_parts(config, store, notifier)
    }

    /// Creates state with an explicit store and notifier.
    pub fn with_parts(
        config: ConfigLoader,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let recorder = PunchRecorder::new(store, notifier, config.settings().organization.clone());
        Self {
            config: Arc::new(config),
            recorder: Arc::new(recorder),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the punch recorder.
    pub fn recorder(&self) -> &PunchRecorder {
        &self.recorder
    }

    /// Returns the event store.
    pub fn store(&self) -> &dyn EventStore {
        self.recorder.store().as_ref()
    }
}
