//! Preemptive priority engine with aging.

use super::admission::ArrivalQueue;
use super::process::{fresh_working_set, Process, ProcessId};
use super::ready_queue::ReadyQueue;
use super::selection::{effective_priority, select_min, SelectionKey};
use super::trace::ExecutionTrace;
use super::validation::{
    accept_processes, check_aging_interval, check_context_switch, QuantumRule, SimulationError,
};
use crate::models::{ProcessSpec, SimulationResult, Tick};
use crate::{log_changes, log_checks, log_debug};

/// Preemptive priority scheduling. A ready process gains one priority step
/// per `aging_interval` ticks spent waiting since it last ran.
pub struct PriorityAging {
    processes: Vec<Process>,
    context_switch: Tick,
    aging_interval: Tick,
    verbosity: u8,
}

impl PriorityAging {
    pub fn new(
        specs: &[ProcessSpec],
        context_switch: Tick,
        aging_interval: Tick,
    ) -> Result<Self, SimulationError> {
        check_context_switch(context_switch)?;
        check_aging_interval(aging_interval)?;
        accept_processes(specs, QuantumRule::Ignore)?;
        Ok(Self {
            processes: fresh_working_set(specs, false),
            context_switch,
            aging_interval,
            verbosity: 0,
        })
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the simulation one tick at a time.
    pub fn run(mut self) -> SimulationResult {
        let mut arrivals = ArrivalQueue::new(&self.processes);
        let mut ready = ReadyQueue::new();
        let mut trace = ExecutionTrace::new();
        let mut now: Tick = 0;
        let mut last: Option<ProcessId> = None;
        let mut completed = 0;

        ready.extend(arrivals.admit(&self.processes, now).iter().copied());

        while completed < self.processes.len() {
            let Some(current) = self.pick(&ready, now) else {
                log_debug!(self.verbosity, "[t={}] idle", now);
                now += 1;
                last = None;
                ready.extend(arrivals.admit(&self.processes, now).iter().copied());
                continue;
            };

            if last.is_some_and(|prev| prev != current) {
                log_changes!(
                    self.verbosity,
                    "[t={}] context switch ({} ticks)",
                    now,
                    self.context_switch
                );
                now += self.context_switch;
                ready.extend(arrivals.admit(&self.processes, now).iter().copied());
            }
            if trace.record(current) {
                log_changes!(
                    self.verbosity,
                    "[t={}] dispatch {}",
                    now,
                    self.processes[current].name
                );
            }

            let process = &mut self.processes[current];
            process.execute(1);
            now += 1;
            process.ready_since = now;
            last = Some(current);
            log_debug!(
                self.verbosity,
                "[t={}] {} ran, remaining={}",
                now,
                process.name,
                process.remaining
            );

            ready.extend(arrivals.admit(&self.processes, now).iter().copied());

            let process = &mut self.processes[current];
            if process.is_complete() {
                process.finish(now);
                completed += 1;
                ready.remove(current);
                log_changes!(self.verbosity, "[t={}] {} completed", now, process.name);
            }
        }

        trace.into_result(&self.processes)
    }

    /// Lowest effective priority, then earliest arrival, then name.
    fn pick(&self, ready: &ReadyQueue, now: Tick) -> Option<ProcessId> {
        let processes = &self.processes;
        let aging_interval = self.aging_interval;
        let picked = select_min(ready.iter(), move |_, id| {
            let p = &processes[id];
            SelectionKey::EffectivePriority {
                priority: effective_priority(p.priority, now - p.ready_since, aging_interval),
                arrival: p.arrival,
                name: &p.name,
            }
        });
        if let Some(id) = picked {
            let p = &self.processes[id];
            log_checks!(
                self.verbosity,
                "[t={}] selected {} (effective priority {}, base {})",
                now,
                p.name,
                self.effective_priority(p, now),
                p.priority
            );
        }
        picked
    }

    fn effective_priority(&self, process: &Process, now: Tick) -> i64 {
        effective_priority(
            process.priority,
            now - process.ready_since,
            self.aging_interval,
        )
    }
}
