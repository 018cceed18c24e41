//! # Observable Collections
//!
//! In-process containers that notify subscribers about every change to their
//! contents, meant to sit behind list views and similar observers that update
//! incrementally instead of re-reading everything.
//!
//! ## Features
//!
//! - **Itemized notifications**: `Add`, `Remove`, `Replace` and `Move` carry
//!   the affected item and its indices
//! - **Coalesced bulk inserts**: `add_range` and [`Batch`] announce a whole
//!   batch with a single `Reset`, even if the batch is cut short by a panic
//! - **In-place sorting**: stable sorts that relocate elements one move at a
//!   time, emitting a `Move` per relocation and nothing for elements already
//!   in place
//! - **Observable queue**: a FIFO whose every enqueue and dequeue is announced
//!
//! ## Example
//!
//! ```rust
//! use observable_collections::{ChangeAction, ChangeRecorder, ObservableCollection};
//!
//! let mut prices: ObservableCollection<u32> = ObservableCollection::new();
//! let recorder = ChangeRecorder::new();
//! prices.subscribe(recorder.handler());
//!
//! prices.add_range([42, 7, 19]);
//! prices.sort_by_key(|price| *price);
//!
//! assert_eq!(prices.as_slice(), &[7, 19, 42]);
//! assert_eq!(recorder.count(ChangeAction::Reset), 1);
//! ```

pub mod error;
pub mod observable;

// Re-export the main public API
pub use error::{CollectionError, Result};
pub use observable::{
    Batch, ChangeAction, ChangeRecord, ChangeRecorder, CollectionChange, ObservableCollection,
    ObservableQueue, SubscriptionId,
};
