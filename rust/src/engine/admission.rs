//! Arrival admission shared by every engine.

use super::process::{Process, ProcessId};
use crate::models::Tick;

/// Processes not yet admitted, in stable arrival order.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    order: Vec<ProcessId>,
    next: usize,
}

impl ArrivalQueue {
    pub fn new(processes: &[Process]) -> Self {
        Self {
            order: arrival_order(processes),
            next: 0,
        }
    }

    /// Admit every pending process with `arrival <= now`.
    ///
    /// Returns the newly admitted ids in admission order.
    pub fn admit(&mut self, processes: &[Process], now: Tick) -> &[ProcessId] {
        let start = self.next;
        while let Some(&id) = self.order.get(self.next) {
            if processes[id].arrival > now {
                break;
            }
            self.next += 1;
        }
        &self.order[start..self.next]
    }

    pub fn is_drained(&self) -> bool {
        self.next == self.order.len()
    }
}

/// Process ids sorted by arrival, ties kept in input order.
pub fn arrival_order(processes: &[Process]) -> Vec<ProcessId> {
    let mut order: Vec<ProcessId> = (0..processes.len()).collect();
    order.sort_by_key(|&id| processes[id].arrival);
    order
}
