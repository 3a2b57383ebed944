//! Persistence format for task lists.
//!
//! A task list is stored as a JSON array of
//! `{"id": number, "text": string, "isComplete": boolean}` objects, in
//! display order. There is no envelope and no schema version.

use crate::task::{Task, TaskId, TaskList};

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The list could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The input is not a JSON array of task objects.
    #[error("deserialization error: {0}")]
    Deserialization(String),
    /// The input decodes but repeats a task id.
    #[error("duplicate task id in stored list: {0}")]
    DuplicateId(TaskId),
}

/// Encodes a [`TaskList`] into its JSON persistence form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the list cannot be serialized.
pub fn encode(list: &TaskList) -> Result<String, CodecError> {
    serde_json::to_string(list).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a [`TaskList`] from its JSON persistence form.
///
/// # Errors
///
/// Returns `CodecError::Deserialization` if the input is not a JSON array of
/// tasks, or `CodecError::DuplicateId` if two entries share an id.
pub fn decode(input: &str) -> Result<TaskList, CodecError> {
    let tasks: Vec<Task> =
        serde_json::from_str(input).map_err(|e| CodecError::Deserialization(e.to_string()))?;
    TaskList::try_from(tasks).map_err(|dup| CodecError::DuplicateId(dup.0))
}
