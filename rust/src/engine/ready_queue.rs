//! FIFO ready queue that also supports removing an arbitrary member.

use std::collections::VecDeque;

use super::process::ProcessId;

#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    slots: VecDeque<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, id: ProcessId) {
        debug_assert!(!self.contains(id), "process {} queued twice", id);
        self.slots.push_back(id);
    }

    pub fn pop_front(&mut self) -> Option<ProcessId> {
        self.slots.pop_front()
    }

    pub fn front(&self) -> Option<ProcessId> {
        self.slots.front().copied()
    }

    /// Remove `id` wherever it sits, keeping the order of the rest.
    pub fn remove(&mut self, id: ProcessId) -> bool {
        match self.slots.iter().position(|&slot| slot == id) {
            Some(pos) => {
                self.slots.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.slots.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.slots.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl Extend<ProcessId> for ReadyQueue {
    fn extend<I: IntoIterator<Item = ProcessId>>(&mut self, iter: I) {
        for id in iter {
            self.push_back(id);
        }
    }
}
