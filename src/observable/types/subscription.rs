//! Subscription handle type.
//!
//! This module contains the SubscriptionId returned when a handler is registered
//! with a container, and used later to unregister it.

use serde::Serialize;

/// Identifies one registered change handler.
///
/// Ids are handed out by the container's registry in increasing order and are
/// never reused by the same container, so a stale id can never unregister a
/// handler that was registered after it. Only the registry can create one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    /// Gets the raw counter value behind this id
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id following this one
    pub(crate) fn next(&self) -> SubscriptionId {
        SubscriptionId(self.0 + 1)
    }
}

impl From<SubscriptionId> for u64 {
    fn from(id: SubscriptionId) -> Self {
        id.0
    }
}
