//! Task list model and persistence format for `termtodo`.

pub mod codec;
pub mod task;

pub use task::{DuplicateTaskId, Task, TaskId, TaskList};
