//! Task list controller.
//!
//! `TaskListController` owns the authoritative [`TaskList`] and is the only
//! place it changes. Each successful add, remove, or toggle replaces the
//! current list with a fresh value and runs every subscriber with the new
//! snapshot. Operations that change nothing (blank text, unknown id) publish
//! nothing.

use std::sync::Arc;

use termtodo_proto::{Task, TaskId, TaskList, codec};

use super::LoadError;
use super::ids::{IdAllocator, now_ms};
use super::sync::{SyncStatus, persist_to};
use crate::store::KeyValueStore;

/// Handle returned by [`TaskListController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Arc<TaskList>)>;

/// Owns the task list and notifies subscribers of every change.
pub struct TaskListController {
    /// Latest published list. Replaced, never mutated.
    tasks: Arc<TaskList>,
    ids: IdAllocator,
    clock: fn() -> u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for TaskListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListController")
            .field("tasks", &self.tasks)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for TaskListController {
    fn default() -> Self {
        Self::new(TaskList::new())
    }
}

impl TaskListController {
    /// Creates a controller over an initial list with no subscribers.
    #[must_use]
    pub fn new(initial: TaskList) -> Self {
        Self {
            ids: IdAllocator::seeded_from(&initial),
            tasks: Arc::new(initial),
            clock: now_ms,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the millisecond clock used for new ids.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Reads the list stored under `key`, failing on unreadable content.
    ///
    /// A missing entry yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Store`] if the store read fails, or
    /// [`LoadError::Decode`] if the stored value is not a valid task list.
    pub fn try_load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Self, LoadError> {
        let list = match store.load(key)? {
            Some(raw) => codec::decode(&raw)?,
            None => TaskList::new(),
        };
        tracing::info!(key, tasks = list.len(), "task list loaded");
        Ok(Self::new(list))
    }

    /// Reads the list stored under `key`, starting empty if it is unreadable.
    ///
    /// The failure is logged; the stored value is left alone until the
    /// first mutation overwrites it.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Self {
        Self::try_load(store, key).unwrap_or_else(|err| {
            tracing::warn!(key, error = %err, "stored task list unreadable; starting empty");
            Self::default()
        })
    }

    /// Loads from `store` and registers write-through persistence to it.
    ///
    /// Returns the controller and a handle on the persistence status.
    pub fn open<S>(store: S, key: &str) -> (Self, SyncStatus)
    where
        S: KeyValueStore + 'static,
    {
        let controller = Self::load(&store, key);
        controller.with_persistence(store, key)
    }

    /// Like [`open`](Self::open), but fails instead of discarding unreadable
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] under the same conditions as
    /// [`try_load`](Self::try_load).
    pub fn open_strict<S>(store: S, key: &str) -> Result<(Self, SyncStatus), LoadError>
    where
        S: KeyValueStore + 'static,
    {
        let controller = Self::try_load(&store, key)?;
        Ok(controller.with_persistence(store, key))
    }

    fn with_persistence<S>(mut self, store: S, key: &str) -> (Self, SyncStatus)
    where
        S: KeyValueStore + 'static,
    {
        let status = SyncStatus::new();
        self.subscribe(persist_to(store, key, status.clone()));
        (self, status)
    }

    /// Returns the current list snapshot.
    ///
    /// The same `Arc` is returned until the next successful mutation, so
    /// `Arc::ptr_eq` tells whether anything changed.
    #[must_use]
    pub fn tasks(&self) -> Arc<TaskList> {
        Arc::clone(&self.tasks)
    }

    /// Adds a task with the trimmed `text` at the end of the list.
    ///
    /// Returns the new task's id, or `None` if `text` is empty after
    /// trimming (nothing changes in that case).
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.ids.next_unused((self.clock)(), &self.tasks);
        match self.tasks.with_task(Task::new(id, text)) {
            Ok(next) => {
                tracing::debug!(task_id = %id, "task added");
                self.publish(next);
                Some(id)
            }
            Err(err) => {
                tracing::error!(error = %err, "id allocator produced a duplicate; add dropped");
                None
            }
        }
    }

    /// Removes the task with `id`.
    ///
    /// Returns `false` without publishing if no such task exists.
    pub fn remove(&mut self, id: TaskId) -> bool {
        if !self.tasks.contains(id) {
            return false;
        }
        let next = self.tasks.without(id);
        tracing::debug!(task_id = %id, "task removed");
        self.publish(next);
        true
    }

    /// Flips the completion flag of the task with `id`.
    ///
    /// Returns the new flag, or `None` without publishing if no such task
    /// exists.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        if !self.tasks.contains(id) {
            return None;
        }
        let next = self.tasks.with_toggled(id);
        let is_complete = next.find(id).map(|t| t.is_complete);
        tracing::debug!(task_id = %id, ?is_complete, "task toggled");
        self.publish(next);
        is_complete
    }

    /// Registers `callback` to run after every successful mutation.
    ///
    /// Callbacks run in registration order with the new snapshot.
    pub fn subscribe(&mut self, callback: impl FnMut(&Arc<TaskList>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self, next: TaskList) {
        self.tasks = Arc::new(next);
        for (_, callback) in &mut self.subscribers {
            callback(&self.tasks);
        }
    }
}
