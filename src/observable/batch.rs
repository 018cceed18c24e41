//! Scoped notification suppression for bulk mutations.

use tracing::debug;

use crate::error::{CollectionError, Result};
use crate::observable::collection::ObservableCollection;
use crate::observable::types::CollectionChange;

/// A batch of mutations announced to subscribers as a single `Reset`.
///
/// While the batch is alive it holds the collection mutably, so nothing else
/// can observe or mutate it, and none of its operations notify. When the batch
/// is dropped it announces one `Reset` if it changed anything, and nothing
/// otherwise.
///
/// The announcement happens in `Drop`, which also runs while unwinding, so a
/// batch cut short by a panic still leaves subscribers with an accurate
/// `Reset` and the collection back in normal notifying mode.
///
/// ```rust
/// use observable_collections::ObservableCollection;
///
/// let mut rows = ObservableCollection::from_vec(vec![3, 4]);
/// {
///     let mut batch = rows.batch();
///     batch.add(5);
///     batch.remove_at(0).unwrap();
/// } // one Reset here
/// assert_eq!(rows.as_slice(), &[4, 5]);
/// ```
pub struct Batch<'a, T> {
    collection: &'a mut ObservableCollection<T>,
    added: usize,
    removed: usize,
    changed: bool,
}

impl<'a, T> Batch<'a, T> {
    pub(crate) fn new(collection: &'a mut ObservableCollection<T>) -> Self {
        Batch {
            collection,
            added: 0,
            removed: 0,
            changed: false,
        }
    }

    /// Appends `item` without notifying.
    pub fn add(&mut self, item: T) {
        self.collection.items.push(item);
        self.added += 1;
        self.changed = true;
    }

    /// Appends every item in order. Returns how many were appended.
    pub fn extend<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for item in items {
            self.add(item);
            count += 1;
        }
        count
    }

    /// Inserts `item` at `index`, which may equal the length.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        let len = self.collection.items.len();
        if index > len {
            return Err(CollectionError::IndexOutOfRange { index, len });
        }
        self.collection.items.insert(index, item);
        self.added += 1;
        self.changed = true;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.collection.items.len();
        if index >= len {
            return Err(CollectionError::IndexOutOfRange { index, len });
        }
        self.removed += 1;
        self.changed = true;
        Ok(self.collection.items.remove(index))
    }

    /// Removes every element. A no-op on an empty collection.
    pub fn clear(&mut self) {
        let len = self.collection.items.len();
        if len == 0 {
            return;
        }
        self.collection.items.clear();
        self.removed += len;
        self.changed = true;
    }

    /// Current length, including changes made in this batch.
    pub fn len(&self) -> usize {
        self.collection.items.len()
    }

    /// Whether the collection is currently empty.
    pub fn is_empty(&self) -> bool {
        self.collection.items.is_empty()
    }

    /// The elements as they stand mid-batch.
    pub fn as_slice(&self) -> &[T] {
        &self.collection.items
    }
}

impl<T> Drop for Batch<'_, T> {
    fn drop(&mut self) {
        if !self.changed {
            return;
        }
        debug!(
            added = self.added,
            removed = self.removed,
            len = self.collection.items.len(),
            "batch committed"
        );
        self.collection.subscribers.notify(&CollectionChange::Reset);
    }
}
