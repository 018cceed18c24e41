//! Change notification types.
//!
//! A container describes every mutation to its subscribers with a
//! [`CollectionChange`], which borrows the affected items for the duration of
//! the callback. Subscribers that need to keep a notification around convert it
//! into an owned [`ChangeRecord`].

use serde::{Deserialize, Serialize};

/// The kind of mutation a notification describes, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

/// A single change notification delivered to subscribers.
///
/// `Reset` carries no item-level detail: it announces that the contents changed
/// wholesale, as after a bulk insert or a clear, and observers should re-read the
/// container.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionChange<'a, T> {
    /// `item` now lives at `index`
    Add { item: &'a T, index: usize },
    /// `item` was taken out of `index`
    Remove { item: &'a T, index: usize },
    /// The element at `index` was overwritten
    Replace {
        old_item: &'a T,
        new_item: &'a T,
        index: usize,
    },
    /// `item` was relocated from `old_index` to `new_index`
    Move {
        item: &'a T,
        old_index: usize,
        new_index: usize,
    },
    Reset,
}

impl<'a, T> CollectionChange<'a, T> {
    /// Returns the payload-free kind of this change.
    pub fn action(&self) -> ChangeAction {
        match self {
            CollectionChange::Add { .. } => ChangeAction::Add,
            CollectionChange::Remove { .. } => ChangeAction::Remove,
            CollectionChange::Replace { .. } => ChangeAction::Replace,
            CollectionChange::Move { .. } => ChangeAction::Move,
            CollectionChange::Reset => ChangeAction::Reset,
        }
    }

    /// Returns the affected item. For `Replace` this is the incoming item.
    pub fn item(&self) -> Option<&'a T> {
        match *self {
            CollectionChange::Add { item, .. }
            | CollectionChange::Remove { item, .. }
            | CollectionChange::Move { item, .. } => Some(item),
            CollectionChange::Replace { new_item, .. } => Some(new_item),
            CollectionChange::Reset => None,
        }
    }

    /// Position the item occupied before the change, if it had one.
    pub fn old_index(&self) -> Option<usize> {
        match *self {
            CollectionChange::Remove { index, .. } | CollectionChange::Replace { index, .. } => {
                Some(index)
            }
            CollectionChange::Move { old_index, .. } => Some(old_index),
            CollectionChange::Add { .. } | CollectionChange::Reset => None,
        }
    }

    /// Position the item occupies after the change, if it still has one.
    pub fn new_index(&self) -> Option<usize> {
        match *self {
            CollectionChange::Add { index, .. } | CollectionChange::Replace { index, .. } => {
                Some(index)
            }
            CollectionChange::Move { new_index, .. } => Some(new_index),
            CollectionChange::Remove { .. } | CollectionChange::Reset => None,
        }
    }
}

impl<T: Clone> CollectionChange<'_, T> {
    /// Clones the borrowed payload into an owned record.
    pub fn to_record(&self) -> ChangeRecord<T> {
        match *self {
            CollectionChange::Add { item, index } => ChangeRecord::Add {
                item: item.clone(),
                index,
            },
            CollectionChange::Remove { item, index } => ChangeRecord::Remove {
                item: item.clone(),
                index,
            },
            CollectionChange::Replace {
                old_item,
                new_item,
                index,
            } => ChangeRecord::Replace {
                old_item: old_item.clone(),
                new_item: new_item.clone(),
                index,
            },
            CollectionChange::Move {
                item,
                old_index,
                new_index,
            } => ChangeRecord::Move {
                item: item.clone(),
                old_index,
                new_index,
            },
            CollectionChange::Reset => ChangeRecord::Reset,
        }
    }
}

/// Owned form of [`CollectionChange`], with the same wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChangeRecord<T> {
    Add {
        item: T,
        index: usize,
    },
    Remove {
        item: T,
        index: usize,
    },
    Replace {
        old_item: T,
        new_item: T,
        index: usize,
    },
    Move {
        item: T,
        old_index: usize,
        new_index: usize,
    },
    Reset,
}

impl<T> ChangeRecord<T> {
    /// Returns the payload-free kind of this record.
    pub fn action(&self) -> ChangeAction {
        match self {
            ChangeRecord::Add { .. } => ChangeAction::Add,
            ChangeRecord::Remove { .. } => ChangeAction::Remove,
            ChangeRecord::Replace { .. } => ChangeAction::Replace,
            ChangeRecord::Move { .. } => ChangeAction::Move,
            ChangeRecord::Reset => ChangeAction::Reset,
        }
    }

    /// Returns the affected item. For `Replace` this is the incoming item.
    pub fn item(&self) -> Option<&T> {
        match self {
            ChangeRecord::Add { item, .. }
            | ChangeRecord::Remove { item, .. }
            | ChangeRecord::Move { item, .. } => Some(item),
            ChangeRecord::Replace { new_item, .. } => Some(new_item),
            ChangeRecord::Reset => None,
        }
    }
}
