//! Observable first-in-first-out queue.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::observable::subscribers::Subscribers;
use crate::observable::types::{CollectionChange, SubscriptionId};

/// A FIFO queue whose every enqueue and dequeue is announced.
///
/// Unlike [`ObservableCollection`](crate::ObservableCollection) there is no
/// batch mode: `extend` is a loop of `enqueue`, one `Add` per item.
pub struct ObservableQueue<T> {
    items: VecDeque<T>,
    subscribers: Subscribers<T>,
}

impl<T> ObservableQueue<T> {
    /// Creates an empty queue with no subscribers.
    pub fn new() -> Self {
        ObservableQueue {
            items: VecDeque::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Creates a queue whose front is the first element of `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        ObservableQueue {
            items: VecDeque::from(items),
            subscribers: Subscribers::new(),
        }
    }

    /// Registers `handler` for every later enqueue and dequeue.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CollectionChange<'_, T>) + Send + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Removes a handler. Returns `false` if `id` is not registered here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Pushes `item` onto the back and announces `Add` at the back index.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
        let index = self.items.len() - 1;
        self.subscribers.notify(&CollectionChange::Add {
            item: &self.items[index],
            index,
        });
    }

    /// Takes the oldest item and announces `Remove` at index 0.
    ///
    /// Returns `None`, announcing nothing, when the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.subscribers.notify(&CollectionChange::Remove {
            item: &item,
            index: 0,
        });
        Some(item)
    }

    /// Enqueues each item in turn.
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.enqueue(item);
        }
    }

    /// The item the next `dequeue` would return.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates from front (oldest) to back.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for ObservableQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableQueue")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> FromIterator<T> for ObservableQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ObservableQueue {
            items: iter.into_iter().collect(),
            subscribers: Subscribers::new(),
        }
    }
}

impl<T: Serialize> Serialize for ObservableQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ObservableQueue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(ObservableQueue::from_vec)
    }
}
