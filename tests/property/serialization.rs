//! Property-based tests for the task list model and persistence format.
//!
//! Uses proptest to verify:
//! 1. Any valid `TaskList` survives encode → decode unchanged.
//! 2. Arbitrary input never causes a panic in `decode` (returns `Err` gracefully).
//! 3. Toggling the same id twice restores the list.
//! 4. Removing a present id shrinks the list by one and leaves the rest in order.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use termtodo_proto::codec;
use termtodo_proto::{Task, TaskId, TaskList};

/// Strategy for generating task text, including unicode and quotes.
fn arb_text() -> impl Strategy<Value = String> {
    "[^\x00]{1,64}"
}

/// Strategy for generating a list of tasks with distinct ids.
///
/// Ids start from an arbitrary base and grow by an arbitrary positive step
/// so they stay unique without being consecutive.
fn arb_task_list() -> impl Strategy<Value = TaskList> {
    (
        0u64..=u64::MAX / 2,
        1u64..1_000,
        prop::collection::vec((arb_text(), any::<bool>()), 0..24),
    )
        .prop_map(|(base, step, entries)| {
            let tasks: Vec<Task> = entries
                .into_iter()
                .zip(0u64..)
                .map(|((text, is_complete), i)| Task {
                    id: TaskId::new(base + i * step),
                    text,
                    is_complete,
                })
                .collect();
            TaskList::try_from(tasks).unwrap_or_default()
        })
}

proptest! {
    #[test]
    fn task_list_round_trips(list in arb_task_list()) {
        let encoded = codec::encode(&list).unwrap();
        let decoded = codec::decode(&encoded).unwrap();
        prop_assert_eq!(decoded, list);
    }

    #[test]
    fn decode_never_panics_on_arbitrary_input(input in ".{0,256}") {
        let _ = codec::decode(&input);
    }

    #[test]
    fn decode_never_panics_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let input = String::from_utf8_lossy(&bytes);
        let _ = codec::decode(&input);
    }

    #[test]
    fn toggle_is_an_involution(list in arb_task_list(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!list.is_empty());
        let target = list.get(pick.index(list.len())).unwrap().id;
        let once = list.with_toggled(target);
        prop_assert_ne!(&once, &list);
        for task in &list {
            let after = once.find(task.id).unwrap();
            if task.id == target {
                prop_assert_eq!(after.is_complete, !task.is_complete);
            } else {
                prop_assert_eq!(after, task);
            }
        }
        prop_assert_eq!(once.with_toggled(target), list);
    }

    #[test]
    fn remove_present_id_shrinks_by_one(list in arb_task_list(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!list.is_empty());
        let target = list.get(pick.index(list.len())).unwrap().id;
        let next = list.without(target);
        prop_assert_eq!(next.len(), list.len() - 1);
        prop_assert!(!next.contains(target));
        let expected: Vec<&Task> = list.iter().filter(|t| t.id != target).collect();
        let actual: Vec<&Task> = next.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn remove_absent_id_is_identity(list in arb_task_list()) {
        let absent = list.max_id().map_or(TaskId::new(0), |id| TaskId::new(id.as_u64() + 1));
        prop_assert_eq!(list.without(absent), list);
    }
}
