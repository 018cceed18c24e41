//! A subscriber that keeps owned copies of the notifications it receives.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observable::types::{ChangeAction, ChangeRecord, CollectionChange};

/// Records every change delivered to its handler.
///
/// Clones share the same log, so one clone can be handed to a container via
/// [`handler`](Self::handler) while another, possibly on a different thread,
/// reads what was recorded.
pub struct ChangeRecorder<T> {
    records: Arc<Mutex<Vec<ChangeRecord<T>>>>,
}

impl<T: Clone + Send + 'static> ChangeRecorder<T> {
    /// Creates a recorder with an empty log.
    pub fn new() -> Self {
        ChangeRecorder {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handler that appends to this recorder's log.
    pub fn handler(&self) -> impl FnMut(&CollectionChange<'_, T>) + Send + 'static {
        let records = Arc::clone(&self.records);
        move |change: &CollectionChange<'_, T>| records.lock().push(change.to_record())
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<ChangeRecord<T>> {
        self.records.lock().clone()
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<ChangeRecord<T>> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Number of changes recorded so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Number of recorded changes of the given kind.
    pub fn count(&self, action: ChangeAction) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| record.action() == action)
            .count()
    }

    /// The kind of each recorded change, oldest first.
    pub fn actions(&self) -> Vec<ChangeAction> {
        self.records.lock().iter().map(ChangeRecord::action).collect()
    }
}

impl<T: Clone + Send + 'static> Default for ChangeRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ChangeRecorder<T> {
    fn clone(&self) -> Self {
        ChangeRecorder {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ChangeRecorder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeRecorder")
            .field("records", &*self.records.lock())
            .finish()
    }
}
