//! Task list state management for `termtodo`.
//!
//! The controller owns the list and publishes every change to its
//! subscribers; write-through persistence is one such subscriber and the
//! UI's view refresh is another.

pub mod controller;
pub mod ids;
pub mod sync;

pub use controller::{SubscriptionId, TaskListController};
pub use ids::IdAllocator;
pub use sync::{SyncStatus, persist_to};

use termtodo_proto::codec::CodecError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while loading the persisted task list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The store could not be read.
    #[error("could not read stored task list: {0}")]
    Store(#[from] StoreError),
    /// The stored value is not a valid task list.
    #[error("stored task list is corrupt: {0}")]
    Decode(#[from] CodecError),
}
