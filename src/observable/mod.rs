//! Observable container implementations.
//!
//! This module contains the notifying ordered collection, its batch guard and
//! reordering machinery, the observable queue, and the types they share.

pub mod batch;
pub mod collection;
pub mod queue;
pub mod recorder;
pub mod types;

mod reorder;
mod subscribers;

// Re-export the main public API
pub use batch::Batch;
pub use collection::ObservableCollection;
pub use queue::ObservableQueue;
pub use recorder::ChangeRecorder;
pub use types::{ChangeAction, ChangeRecord, CollectionChange, SubscriptionId};
