//! Task identifier allocation.

use std::time::{SystemTime, UNIX_EPOCH};

use termtodo_proto::{TaskId, TaskList};

/// Returns the current timestamp in milliseconds since epoch.
pub fn now_ms() -> u64 {
    u64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
    )
    .unwrap_or(u64::MAX)
}

/// Hands out strictly increasing task ids.
///
/// Ids track wall-clock milliseconds, but each id is at least one more than
/// the previous, so several tasks created within the same millisecond (or
/// after the clock steps backwards) still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: Option<u64>,
}

impl IdAllocator {
    /// Creates an allocator that never issues an id already present in `list`.
    #[must_use]
    pub fn seeded_from(list: &TaskList) -> Self {
        Self {
            last: list.max_id().map(TaskId::as_u64),
        }
    }

    /// Issues the next id given the current time.
    ///
    /// Returns `None` once `u64::MAX` has been issued or loaded.
    pub fn next_at(&mut self, now_ms: u64) -> Option<TaskId> {
        let raw = match self.last {
            None => now_ms,
            Some(last) => now_ms.max(last.checked_add(1)?),
        };
        self.last = Some(raw);
        Some(TaskId::new(raw))
    }

    /// Issues an id not used by `list`.
    ///
    /// Prefers [`next_at`](Self::next_at); when the ids above the last one
    /// are exhausted, reuses the smallest id missing from `list`.
    pub fn next_unused(&mut self, now_ms: u64, list: &TaskList) -> TaskId {
        self.next_at(now_ms)
            .unwrap_or_else(|| smallest_unused(list))
    }
}

/// Smallest id that no task in `list` carries.
fn smallest_unused(list: &TaskList) -> TaskId {
    let mut used: Vec<u64> = list.iter().map(|t| t.id.as_u64()).collect();
    used.sort_unstable();
    let mut candidate = 0;
    for id in used {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    TaskId::new(candidate)
}
