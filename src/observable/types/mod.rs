//! Type definitions shared by the observable containers.
//!
//! This module contains the change notification payloads and the handle type
//! used to manage subscriptions.

pub mod change;
pub mod subscription;

pub use change::{ChangeAction, ChangeRecord, CollectionChange};
pub use subscription::SubscriptionId;
