//! Round-Robin engine with block dispatch.

use super::admission::ArrivalQueue;
use super::process::{fresh_working_set, Process};
use super::ready_queue::ReadyQueue;
use super::trace::ExecutionTrace;
use super::validation::{
    accept_processes, check_context_switch, check_rr_quantum, QuantumRule, SimulationError,
};
use crate::models::{ProcessSpec, SimulationResult, Tick};
use crate::{log_changes, log_debug};

/// Round-Robin over a FIFO ready queue with a fixed time slice.
pub struct RoundRobin {
    processes: Vec<Process>,
    quantum: Tick,
    context_switch: Tick,
    verbosity: u8,
}

impl RoundRobin {
    pub fn new(
        specs: &[ProcessSpec],
        quantum: Tick,
        context_switch: Tick,
    ) -> Result<Self, SimulationError> {
        check_context_switch(context_switch)?;
        check_rr_quantum(quantum)?;
        accept_processes(specs, QuantumRule::Ignore)?;
        Ok(Self {
            processes: fresh_working_set(specs, false),
            quantum,
            context_switch,
            verbosity: 0,
        })
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the simulation to completion.
    ///
    /// Each dispatch runs the head of the queue for `min(quantum, remaining)`
    /// ticks at once. Arrivals during that span queue ahead of the
    /// re-enqueued process. A context switch is charged before the next
    /// dispatch only when a different process is waiting at the head.
    pub fn run(mut self) -> SimulationResult {
        let mut arrivals = ArrivalQueue::new(&self.processes);
        let mut ready = ReadyQueue::new();
        let mut trace = ExecutionTrace::new();
        let mut now: Tick = 0;
        let mut completed = 0;

        ready.extend(arrivals.admit(&self.processes, now).iter().copied());

        while completed < self.processes.len() {
            let Some(current) = ready.pop_front() else {
                log_debug!(self.verbosity, "[t={}] idle", now);
                now += 1;
                ready.extend(arrivals.admit(&self.processes, now).iter().copied());
                continue;
            };

            if trace.record(current) {
                log_changes!(
                    self.verbosity,
                    "[t={}] dispatch {}",
                    now,
                    self.processes[current].name
                );
            }

            let process = &mut self.processes[current];
            let slice = self.quantum.min(process.remaining);
            process.execute(slice);
            now += slice;
            log_debug!(
                self.verbosity,
                "[t={}] {} ran {} ticks, remaining={}",
                now,
                process.name,
                slice,
                process.remaining
            );

            ready.extend(arrivals.admit(&self.processes, now).iter().copied());

            let process = &mut self.processes[current];
            if process.is_complete() {
                process.finish(now);
                completed += 1;
                log_changes!(self.verbosity, "[t={}] {} completed", now, process.name);
            } else {
                ready.push_back(current);
            }

            if ready.front().is_some_and(|next| next != current) {
                log_changes!(
                    self.verbosity,
                    "[t={}] context switch ({} ticks)",
                    now,
                    self.context_switch
                );
                now += self.context_switch;
                ready.extend(arrivals.admit(&self.processes, now).iter().copied());
            }
        }

        trace.into_result(&self.processes)
    }
}
