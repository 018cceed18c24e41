//! Ordered registry of change handlers.
//!
//! Both containers own one of these. Handlers are invoked synchronously, in
//! registration order, from inside the mutating call.

use std::fmt;

use tracing::debug;

use crate::observable::types::{CollectionChange, SubscriptionId};

/// A boxed change handler as stored by the registry.
pub(crate) type ChangeHandler<T> = Box<dyn FnMut(&CollectionChange<'_, T>) + Send>;

/// The subscriber set of a container.
///
/// The registry owns the boxed handlers for as long as they are registered and
/// drops them on unsubscribe, so anything a handler captures is released as
/// soon as it is unregistered.
pub(crate) struct Subscribers<T> {
    next_id: SubscriptionId,
    handlers: Vec<(SubscriptionId, ChangeHandler<T>)>,
}

impl<T> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Subscribers {
            next_id: SubscriptionId(1),
            handlers: Vec::new(),
        }
    }

    pub(crate) fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CollectionChange<'_, T>) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id = id.next();
        self.handlers.push((id, Box::new(handler)));
        debug!(subscription = id.value(), total = self.handlers.len(), "handler subscribed");
        id
    }

    /// Removes the handler registered under `id`. Unknown ids are ignored.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        let removed = self.handlers.len() != before;
        if removed {
            debug!(subscription = id.value(), total = self.handlers.len(), "handler unsubscribed");
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers `change` to every handler in registration order.
    pub(crate) fn notify(&mut self, change: &CollectionChange<'_, T>) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(change);
        }
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.handlers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
