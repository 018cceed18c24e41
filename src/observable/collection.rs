//! The notifying ordered container.
//!
//! [`ObservableCollection`] is a `Vec`-backed sequence that tells its
//! subscribers about every change. Single-item operations announce themselves
//! individually; bulk inserts are coalesced into one `Reset`, and sorting
//! reorders in place with one `Move` per relocated element.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{CollectionError, Result};
use crate::observable::batch::Batch;
use crate::observable::reorder::{apply_plan, sort_plan, validate_plan};
use crate::observable::subscribers::Subscribers;
use crate::observable::types::{CollectionChange, SubscriptionId};

/// An ordered sequence that notifies subscribers of each change.
///
/// # Threading
///
/// All mutation takes `&mut self` and handlers run synchronously inside the
/// mutating call, so notifications are delivered in order on the thread that
/// owns the collection. Producers on other threads must hand their updates to
/// that thread instead of sharing the collection.
///
/// Handlers cannot reach back into the collection while it is notifying them:
/// the collection is mutably borrowed for the whole call.
///
/// # Element identity
///
/// [`remove`](Self::remove) finds its target by equality, so with duplicate
/// elements it removes the first match. Sorting does not rely on equality and
/// handles duplicates stably.
pub struct ObservableCollection<T> {
    pub(super) items: Vec<T>,
    pub(super) subscribers: Subscribers<T>,
}

impl<T> ObservableCollection<T> {
    /// Creates an empty collection with no subscribers.
    pub fn new() -> Self {
        ObservableCollection {
            items: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        ObservableCollection {
            items: Vec::with_capacity(capacity),
            subscribers: Subscribers::new(),
        }
    }

    /// Creates a collection holding `items` in order. Nothing is notified.
    pub fn from_vec(items: Vec<T>) -> Self {
        ObservableCollection {
            items,
            subscribers: Subscribers::new(),
        }
    }

    /// Registers a change handler and returns the id that unregisters it.
    ///
    /// Handlers are called in registration order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CollectionChange<'_, T>) + Send + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Unregisters a handler. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Like [`get`](Self::get), but reports a bounds violation as an error.
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(CollectionError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// The element at index 0.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// The element at the highest index.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Iterates the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrows the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the collection, dropping its handlers, and returns the elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Appends `item` and announces it as `Add` at the last index.
    pub fn add(&mut self, item: T) {
        let index = self.items.len();
        self.items.push(item);
        self.subscribers.notify(&CollectionChange::Add {
            item: &self.items[index],
            index,
        });
    }

    /// Inserts `item` at `index`, shifting later elements right.
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.items.len() {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item);
        self.subscribers.notify(&CollectionChange::Add {
            item: &self.items[index],
            index,
        });
        Ok(())
    }

    /// Removes the element at `index` and returns it.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.subscribers.notify(&CollectionChange::Remove {
            item: &removed,
            index,
        });
        Ok(removed)
    }

    /// Overwrites the element at `index`, announcing `Replace`, and returns the
    /// previous element.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.items.len();
        let Some(slot) = self.items.get_mut(index) else {
            return Err(CollectionError::IndexOutOfRange { index, len });
        };
        let old_item = std::mem::replace(slot, item);
        self.subscribers.notify(&CollectionChange::Replace {
            old_item: &old_item,
            new_item: &self.items[index],
            index,
        });
        Ok(old_item)
    }

    /// Relocates one element. Moving an element onto its own index is a no-op
    /// and announces nothing.
    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        let len = self.items.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(CollectionError::IndexOutOfRange { index, len });
            }
        }
        if old_index == new_index {
            return Ok(());
        }

        let item = self.items.remove(old_index);
        self.items.insert(new_index, item);
        self.subscribers.notify(&CollectionChange::Move {
            item: &self.items[new_index],
            old_index,
            new_index,
        });
        Ok(())
    }

    /// Removes every element and announces `Reset`. Clearing an empty
    /// collection announces nothing.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.subscribers.notify(&CollectionChange::Reset);
    }

    /// Appends every item of `items` in order and announces a single `Reset`.
    ///
    /// No per-item `Add` is emitted. An empty input changes nothing and emits
    /// nothing. If the iterator panics part way through, the items already
    /// taken stay in the collection and the `Reset` is still delivered.
    ///
    /// Returns the number of items appended.
    pub fn add_range<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut batch = self.batch();
        batch.extend(items)
    }

    /// Starts a batch of mutations whose notifications are coalesced.
    ///
    /// See [`Batch`] for the guarantees around its end.
    pub fn batch(&mut self) -> Batch<'_, T> {
        Batch::new(self)
    }

    /// Reorders the collection ascending by `key`, stably.
    ///
    /// Returns the number of `Move` notifications emitted.
    pub fn sort_by_key<K, F>(&mut self, mut key: F) -> usize
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let plan = sort_plan(&self.items, |a, b| key(a).cmp(&key(b)));
        let moves = self.apply(&plan);
        debug!(len = self.items.len(), moves, "sorted ascending by key");
        moves
    }

    /// Reorders the collection descending by `key`. Elements with equal keys
    /// keep their original relative order.
    pub fn sort_by_key_descending<K, F>(&mut self, mut key: F) -> usize
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let plan = sort_plan(&self.items, |a, b| key(b).cmp(&key(a)));
        let moves = self.apply(&plan);
        debug!(len = self.items.len(), moves, "sorted descending by key");
        moves
    }

    /// Reorders the collection by `key`, ordering keys with `compare` instead of
    /// their natural order.
    pub fn sort_by_key_with<K, F, C>(&mut self, mut key: F, mut compare: C) -> usize
    where
        F: FnMut(&T) -> K,
        C: FnMut(&K, &K) -> Ordering,
    {
        let plan = sort_plan(&self.items, |a, b| compare(&key(a), &key(b)));
        let moves = self.apply(&plan);
        debug!(len = self.items.len(), moves, "sorted by key with comparator");
        moves
    }

    /// Reorders the collection by comparing elements directly.
    pub fn sort_by<C>(&mut self, compare: C) -> usize
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        let plan = sort_plan(&self.items, compare);
        let moves = self.apply(&plan);
        debug!(len = self.items.len(), moves, "sorted by comparator");
        moves
    }

    /// Moves elements so that final position `i` holds the element currently
    /// at `plan[i]`, emitting one `Move` per relocation.
    ///
    /// `plan` must be a permutation of `0..len()`; otherwise nothing is changed
    /// and `InvalidArgument` is returned.
    pub fn reorder(&mut self, plan: &[usize]) -> Result<usize> {
        validate_plan(plan, self.items.len())?;
        Ok(self.apply(plan))
    }

    fn apply(&mut self, plan: &[usize]) -> usize {
        let subscribers = &mut self.subscribers;
        apply_plan(&mut self.items, plan, |item, old_index, new_index| {
            trace!(old_index, new_index, "moved item");
            subscribers.notify(&CollectionChange::Move {
                item,
                old_index,
                new_index,
            });
        })
    }
}

impl<T: PartialEq> ObservableCollection<T> {
    /// Whether any element equals `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|existing| existing == item)
    }

    /// Removes the first element equal to `item` and returns it.
    ///
    /// An absent item is reported as `ItemNotFound`; the collection is left
    /// unchanged and nothing is announced.
    pub fn remove(&mut self, item: &T) -> Result<T> {
        let index = self.index_of(item).ok_or(CollectionError::ItemNotFound)?;
        self.remove_at(index)
    }
}

impl<T> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the elements only. The copy starts with no subscribers.
impl<T: Clone> Clone for ObservableCollection<T> {
    fn clone(&self) -> Self {
        ObservableCollection::from_vec(self.items.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> Index<usize> for ObservableCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T> FromIterator<T> for ObservableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ObservableCollection::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for ObservableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        ObservableCollection::from_vec(items)
    }
}

impl<'a, T> IntoIterator for &'a ObservableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for ObservableCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ObservableCollection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(ObservableCollection::from_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::recorder::ChangeRecorder;
    use crate::observable::types::{ChangeAction, ChangeRecord};

    fn observed(items: Vec<char>) -> (ObservableCollection<char>, ChangeRecorder<char>) {
        let mut collection = ObservableCollection::from_vec(items);
        let recorder = ChangeRecorder::new();
        collection.subscribe(recorder.handler());
        (collection, recorder)
    }

    #[test]
    fn test_collection_creation() {
        let collection: ObservableCollection<char> = ObservableCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.subscriber_count(), 0);

        let collection: ObservableCollection<char> = ObservableCollection::with_capacity(8);
        assert!(collection.is_empty());
        assert_eq!(collection.first(), None);
        assert_eq!(collection.last(), None);

        let collection = ObservableCollection::from_vec(vec!['A', 'B', 'A']);
        assert_eq!(collection.as_slice(), &['A', 'B', 'A']);
        assert_eq!(collection.first(), Some(&'A'));
        assert_eq!(collection.last(), Some(&'A'));
        assert!(collection.contains(&'B'));
        assert!(!collection.contains(&'Z'));
        assert_eq!(collection.index_of(&'A'), Some(0));
        assert_eq!(collection.index_of(&'B'), Some(1));
        assert_eq!(collection.index_of(&'Z'), None);
    }

    #[test]
    fn test_add_notifies_last_index() {
        let (mut collection, recorder) = observed(vec!['A']);
        collection.add('B');

        assert_eq!(
            recorder.records(),
            vec![ChangeRecord::Add {
                item: 'B',
                index: 1
            }]
        );
    }

    #[test]
    fn test_insert_and_remove_at() {
        let (mut collection, recorder) = observed(vec!['A', 'C']);
        collection.insert(1, 'B').unwrap();
        assert_eq!(collection.as_slice(), &['A', 'B', 'C']);

        let removed = collection.remove_at(0).unwrap();
        assert_eq!(removed, 'A');
        assert_eq!(
            recorder.records(),
            vec![
                ChangeRecord::Add {
                    item: 'B',
                    index: 1
                },
                ChangeRecord::Remove {
                    item: 'A',
                    index: 0
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_operations() {
        let (mut collection, recorder) = observed(vec!['A']);

        assert_eq!(
            collection.insert(2, 'X'),
            Err(CollectionError::IndexOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(
            collection.remove_at(1),
            Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            collection.set(3, 'X'),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            collection.move_item(0, 1),
            Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            collection.try_get(1),
            Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
        );

        assert_eq!(collection.as_slice(), &['A']);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_remove_found_and_missing() {
        let (mut collection, recorder) = observed(vec!['A', 'B', 'A']);

        assert_eq!(collection.remove(&'A'), Ok('A'));
        assert_eq!(collection.as_slice(), &['B', 'A']);
        assert_eq!(recorder.len(), 1);

        assert_eq!(collection.remove(&'Z'), Err(CollectionError::ItemNotFound));
        assert_eq!(collection.as_slice(), &['B', 'A']);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_set_replaces() {
        let (mut collection, recorder) = observed(vec!['A', 'B']);
        assert_eq!(collection.set(1, 'X'), Ok('B'));

        assert_eq!(
            recorder.records(),
            vec![ChangeRecord::Replace {
                old_item: 'B',
                new_item: 'X',
                index: 1
            }]
        );
    }

    #[test]
    fn test_move_item() {
        let (mut collection, recorder) = observed(vec!['A', 'B', 'C']);
        collection.move_item(0, 2).unwrap();
        collection.move_item(1, 1).unwrap();

        assert_eq!(collection.as_slice(), &['B', 'C', 'A']);
        assert_eq!(
            recorder.records(),
            vec![ChangeRecord::Move {
                item: 'A',
                old_index: 0,
                new_index: 2
            }]
        );
    }

    #[test]
    fn test_clear() {
        let (mut collection, recorder) = observed(vec!['A']);
        collection.clear();
        collection.clear();

        assert!(collection.is_empty());
        assert_eq!(recorder.records(), vec![ChangeRecord::Reset]);
    }

    #[test]
    fn test_add_range_single_reset() {
        let (mut collection, recorder) = observed(vec!['A']);
        let added = collection.add_range("BCD".chars());

        assert_eq!(added, 3);
        assert_eq!(collection.as_slice(), &['A', 'B', 'C', 'D']);
        assert_eq!(recorder.records(), vec![ChangeRecord::Reset]);
    }

    #[test]
    fn test_add_range_empty_is_silent() {
        let (mut collection, recorder) = observed(vec!['A']);
        assert_eq!(collection.add_range(Vec::new()), 0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_sort_by_key_moves() {
        let (mut collection, recorder) = observed(vec!['C', 'A', 'B']);
        let moves = collection.sort_by_key(|c| *c);

        assert_eq!(collection.as_slice(), &['A', 'B', 'C']);
        assert_eq!(moves, 2);
        assert_eq!(recorder.count(ChangeAction::Move), 2);

        assert_eq!(collection.sort_by_key(|c| *c), 0);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut collection =
            ObservableCollection::from_vec(vec![(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')]);
        collection.sort_by_key_descending(|pair| pair.0);

        assert_eq!(
            collection.as_slice(),
            &[(2, 'b'), (2, 'd'), (1, 'a'), (1, 'c')]
        );
    }

    #[test]
    fn test_sort_with_comparator() {
        let mut collection = ObservableCollection::from_vec(vec!["bb", "a", "ccc"]);
        // Longest first: the comparator replaces the natural string order.
        collection.sort_by_key_with(|s| s.len(), |a, b| b.cmp(a));

        assert_eq!(collection.as_slice(), &["ccc", "bb", "a"]);
    }

    #[test]
    fn test_reorder_rejects_bad_plan() {
        let (mut collection, recorder) = observed(vec!['A', 'B', 'C']);

        assert!(matches!(
            collection.reorder(&[0, 0, 1]),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert_eq!(collection.as_slice(), &['A', 'B', 'C']);
        assert!(recorder.is_empty());

        assert_eq!(collection.reorder(&[1, 2, 0]), Ok(2));
        assert_eq!(collection.as_slice(), &['B', 'C', 'A']);
    }

    #[test]
    fn test_sort_by_element_comparator() {
        let mut collection = ObservableCollection::from_vec(vec![3, 1, 2, 1]);
        let recorder = ChangeRecorder::new();
        collection.subscribe(recorder.handler());

        let moves = collection.sort_by(|a, b| b.cmp(a));
        assert_eq!(collection.as_slice(), &[3, 2, 1, 1]);
        assert_eq!(moves, recorder.count(ChangeAction::Move));
        assert_eq!(recorder.len(), moves);
        assert_eq!(
            recorder.records(),
            vec![ChangeRecord::Move {
                item: 2,
                old_index: 2,
                new_index: 1
            }]
        );

        // Ties keep their original relative order.
        let mut pairs = ObservableCollection::from_vec(vec![(1, 'a'), (0, 'b'), (1, 'c')]);
        let recorder = ChangeRecorder::new();
        pairs.subscribe(recorder.handler());

        let moves = pairs.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(pairs.as_slice(), &[(0, 'b'), (1, 'a'), (1, 'c')]);
        assert_eq!(moves, 1);
        assert_eq!(recorder.count(ChangeAction::Move), 1);
    }

    #[test]
    fn test_clone_drops_subscribers() {
        let (collection, _recorder) = observed(vec!['A']);
        let copy = collection.clone();

        assert_eq!(copy.as_slice(), collection.as_slice());
        assert_eq!(collection.subscriber_count(), 1);
        assert_eq!(copy.subscriber_count(), 0);
    }
}
