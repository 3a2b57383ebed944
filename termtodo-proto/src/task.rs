//! Task model for `termtodo`.
//!
//! A [`TaskList`] is an insertion-ordered sequence of [`Task`] values with
//! unique identifiers. Every update operation takes `&self` and returns a
//! fresh list, so a list that has been handed out is never changed
//! underneath its holder.

use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Serialized as a bare JSON number. Values issued by the controller sit in
/// the epoch-millisecond range, but nothing here depends on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
///
/// `id` and `text` never change after creation; `is_complete` changes only
/// through [`TaskList::with_toggled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Task text, already trimmed and non-empty when created by the controller.
    pub text: String,
    /// Whether the task has been marked done.
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

impl Task {
    /// Creates an incomplete task.
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_complete: false,
        }
    }

    /// Returns a copy of this task with the completion flag negated.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            is_complete: !self.is_complete,
            ..self.clone()
        }
    }
}

/// Raised when a list would contain the same id twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duplicate task id: {0}")]
pub struct DuplicateTaskId(pub TaskId);

/// Ordered task collection with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Number of tasks in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the list has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates tasks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns the task at `index` in display order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Finds a task by id.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns the display index of the task with `id`.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Returns `true` if a task with `id` is present.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Number of tasks marked complete.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_complete).count()
    }

    /// Largest id in the list, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|t| t.id).max()
    }

    /// Returns a new list with `task` appended at the end.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateTaskId`] if a task with the same id is already
    /// present; the list is left as it was.
    pub fn with_task(&self, task: Task) -> Result<Self, DuplicateTaskId> {
        if self.contains(task.id) {
            return Err(DuplicateTaskId(task.id));
        }
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.extend(self.tasks.iter().cloned());
        tasks.push(task);
        Ok(Self { tasks })
    }

    /// Returns a new list without the task whose id is `id`.
    ///
    /// An unknown id yields a list equal to `self`.
    #[must_use]
    pub fn without(&self, id: TaskId) -> Self {
        Self {
            tasks: self.tasks.iter().filter(|t| t.id != id).cloned().collect(),
        }
    }

    /// Returns a new list where the task with `id` has its completion flag
    /// negated. Every other task is carried over unchanged.
    ///
    /// An unknown id yields a list equal to `self`.
    #[must_use]
    pub fn with_toggled(&self, id: TaskId) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| if t.id == id { t.toggled() } else { t.clone() })
                .collect(),
        }
    }
}

impl TryFrom<Vec<Task>> for TaskList {
    type Error = DuplicateTaskId;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(DuplicateTaskId(task.id));
            }
        }
        Ok(Self { tasks })
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
