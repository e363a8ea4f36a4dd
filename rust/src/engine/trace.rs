//! Execution trace recording and final result aggregation.

use super::process::{Process, ProcessId};
use crate::models::{ProcessResult, SimulationResult, Tick};

/// Ordered record of dispatches.
///
/// Re-dispatching the process that ran last does not add an entry, so each
/// name appears once per contiguous run.
#[derive(Debug, Clone, Default)]
pub struct ExecutionTrace {
    entries: Vec<ProcessId>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatch. Returns true if it started a new run.
    pub fn record(&mut self, id: ProcessId) -> bool {
        if self.entries.last() == Some(&id) {
            return false;
        }
        self.entries.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the trace and build the caller-facing result.
    pub fn into_result(self, processes: &[Process]) -> SimulationResult {
        let execution_order = self
            .entries
            .iter()
            .map(|&id| processes[id].name.clone())
            .collect();

        let process_results: Vec<ProcessResult> = processes
            .iter()
            .map(|p| {
                debug_assert!(p.completion.is_some(), "{} never completed", p.name);
                ProcessResult {
                    name: p.name.clone(),
                    waiting_time: p.waiting,
                    turnaround_time: p.turnaround,
                    quantum_history: p.quantum.as_ref().map(|q| q.history().to_vec()),
                }
            })
            .collect();

        SimulationResult {
            execution_order,
            average_waiting_time: mean(process_results.iter().map(|r| r.waiting_time)),
            average_turnaround_time: mean(process_results.iter().map(|r| r.turnaround_time)),
            process_results,
        }
    }
}

/// Arithmetic mean, 0 for no values.
fn mean(values: impl Iterator<Item = Tick>) -> f64 {
    let (sum, count) = values.fold((0i64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}
