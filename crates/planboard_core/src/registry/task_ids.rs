//! Task id allocation and live-id tracking.

use crate::model::ids::TaskId;
use std::collections::BTreeSet;

const FIRST_TASK_ID: u64 = 1;

/// Monotonic task id counter plus the set of ids still in use.
///
/// Released ids are never handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdAllocator {
    next: u64,
    live: BTreeSet<TaskId>,
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskIdAllocator {
    pub fn new() -> Self {
        Self {
            next: FIRST_TASK_ID,
            live: BTreeSet::new(),
        }
    }

    /// Returns the next id and records it as live.
    pub fn allocate(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        self.live.insert(id);
        id
    }

    /// Drops `id` from the live set. Returns whether it was live.
    pub fn release(&mut self, id: TaskId) -> bool {
        self.live.remove(&id)
    }

    pub fn is_live(&self, id: TaskId) -> bool {
        self.live.contains(&id)
    }

    /// Live ids in ascending order.
    pub fn live_ids(&self) -> Vec<TaskId> {
        self.live.iter().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
