//! AG hybrid scheduler.
//!
//! Each dispatch is given the process's current quantum, split into three
//! zones by elapsed time:
//!
//! | zone | elapsed range      | behaviour                                  |
//! |------|--------------------|--------------------------------------------|
//! | 1    | `[0, z1)`          | non-preemptive                             |
//! | 2    | `[z1, z2)`         | preempted by a strictly better priority    |
//! | 3    | `[z2, quantum)`    | preempted by a strictly shorter remaining  |
//!
//! with `z1 = ceil(q/4)` and `z2 = z1 + ceil(q/4)`. A preempted process keeps
//! part of its unused slice as quantum growth (half in zone 2, all of it in
//! zone 3). A process that uses its whole slice grows by
//! [`EXHAUSTION_INCREMENT`]. Every change lands in the process's quantum
//! history; completion appends a final 0.

use super::admission::ArrivalQueue;
use super::process::{fresh_working_set, Process, ProcessId, QuantumLedger};
use super::ready_queue::ReadyQueue;
use super::selection::{select_min, SelectionKey};
use super::trace::ExecutionTrace;
use super::validation::{accept_processes, check_context_switch, QuantumRule, SimulationError};
use crate::models::{ProcessSpec, SimulationResult, Tick};
use crate::{log_changes, log_checks, log_debug};

/// Quantum growth when a process runs its full slice without finishing.
pub const EXHAUSTION_INCREMENT: Tick = 2;

/// Behavioural phase of a running process within its quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    NonPreemptive,
    PriorityPreemptible,
    ShortestJobPreemptible,
}

impl Zone {
    /// Zone for a process that has used `elapsed` ticks of `quantum`.
    pub fn of(quantum: Tick, elapsed: Tick) -> Self {
        let (z1, z2) = zone_bounds(quantum);
        if elapsed < z1 {
            Zone::NonPreemptive
        } else if elapsed < z2 {
            Zone::PriorityPreemptible
        } else {
            Zone::ShortestJobPreemptible
        }
    }
}

/// `(z1, z2)` thresholds for a quantum.
pub fn zone_bounds(quantum: Tick) -> (Tick, Tick) {
    let quarter = ceil_div(quantum, 4);
    (quarter, quarter + quarter)
}

fn ceil_div(value: Tick, divisor: Tick) -> Tick {
    (value + divisor - 1).div_euclid(divisor)
}

/// The process currently holding the CPU.
#[derive(Debug, Clone, Copy)]
struct Running {
    id: ProcessId,
    elapsed: Tick,
}

/// A decision to hand the CPU to `next`, giving the running process
/// `new_quantum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Preemption {
    next: ProcessId,
    new_quantum: Tick,
}

/// AG hybrid scheduler over a FIFO ready queue.
pub struct AgScheduler {
    processes: Vec<Process>,
    context_switch: Tick,
    verbosity: u8,
}

impl AgScheduler {
    /// Every spec must carry a positive initial quantum.
    pub fn new(specs: &[ProcessSpec], context_switch: Tick) -> Result<Self, SimulationError> {
        check_context_switch(context_switch)?;
        accept_processes(specs, QuantumRule::Require)?;
        Ok(Self {
            processes: fresh_working_set(specs, true),
            context_switch,
            verbosity: 0,
        })
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the simulation to completion.
    pub fn run(mut self) -> SimulationResult {
        let mut sim = AgRun {
            arrivals: ArrivalQueue::new(&self.processes),
            ready: ReadyQueue::new(),
            trace: ExecutionTrace::new(),
            now: 0,
            last: None,
        };
        let mut running: Option<Running> = None;
        let mut completed = 0;

        sim.admit(&self.processes);

        while completed < self.processes.len() {
            let current = match running {
                Some(r) => r,
                None => match sim.ready.pop_front() {
                    Some(id) => self.dispatch(&mut sim, id),
                    None => {
                        log_debug!(self.verbosity, "[t={}] idle", sim.now);
                        sim.now += 1;
                        sim.last = None;
                        sim.admit(&self.processes);
                        continue;
                    }
                },
            };

            if let Some(preemption) = self.check_preemption(&sim.ready, current, sim.now) {
                if let Some(ledger) = self.ledger_mut(current.id) {
                    ledger.grow_to(preemption.new_quantum);
                }
                log_changes!(
                    self.verbosity,
                    "[t={}] {} preempted by {}, quantum -> {}",
                    sim.now,
                    self.processes[current.id].name,
                    self.processes[preemption.next].name,
                    preemption.new_quantum
                );
                sim.ready.push_back(current.id);
                sim.ready.remove(preemption.next);
                running = Some(self.dispatch(&mut sim, preemption.next));
                continue;
            }

            // One tick of work
            let process = &mut self.processes[current.id];
            process.execute(1);
            let elapsed = current.elapsed + 1;
            sim.now += 1;
            log_debug!(
                self.verbosity,
                "[t={}] {} ran, elapsed={}, remaining={}",
                sim.now,
                process.name,
                elapsed,
                process.remaining
            );
            sim.admit(&self.processes);

            let process = &mut self.processes[current.id];
            if process.is_complete() {
                process.finish(sim.now);
                completed += 1;
                running = None;
                log_changes!(self.verbosity, "[t={}] {} completed", sim.now, process.name);
            } else if elapsed == self.quantum(current.id) {
                if let Some(ledger) = self.ledger_mut(current.id) {
                    ledger.grow_by(EXHAUSTION_INCREMENT);
                }
                sim.ready.push_back(current.id);
                running = None;
                log_changes!(
                    self.verbosity,
                    "[t={}] {} exhausted its quantum, quantum -> {}",
                    sim.now,
                    self.processes[current.id].name,
                    self.quantum(current.id)
                );
            } else {
                running = Some(Running {
                    id: current.id,
                    elapsed,
                });
            }
        }

        sim.trace.into_result(&self.processes)
    }

    /// Hand the CPU to `id`, charging a context switch if it differs from
    /// the process that ran last.
    fn dispatch(&self, sim: &mut AgRun, id: ProcessId) -> Running {
        if sim.last.is_some_and(|prev| prev != id) && self.context_switch > 0 {
            log_changes!(
                self.verbosity,
                "[t={}] context switch ({} ticks)",
                sim.now,
                self.context_switch
            );
            sim.now += self.context_switch;
            sim.admit(&self.processes);
        }
        if sim.trace.record(id) {
            log_changes!(
                self.verbosity,
                "[t={}] dispatch {} (quantum {})",
                sim.now,
                self.processes[id].name,
                self.quantum(id)
            );
        }
        sim.last = Some(id);
        Running { id, elapsed: 0 }
    }

    /// Zone-gated preemption check for the running process.
    fn check_preemption(
        &self,
        ready: &ReadyQueue,
        current: Running,
        now: Tick,
    ) -> Option<Preemption> {
        let running = &self.processes[current.id];
        let quantum = self.quantum(current.id);
        let unused = quantum - current.elapsed;

        match Zone::of(quantum, current.elapsed) {
            Zone::NonPreemptive => None,
            Zone::PriorityPreemptible => {
                let best = select_min(ready.iter(), |position, id| SelectionKey::BestPriority {
                    priority: self.processes[id].priority,
                    position,
                })?;
                log_checks!(
                    self.verbosity,
                    "[t={}] zone 2: {} (priority {}) vs best ready {} (priority {})",
                    now,
                    running.name,
                    running.priority,
                    self.processes[best].name,
                    self.processes[best].priority
                );
                (self.processes[best].priority < running.priority).then(|| Preemption {
                    next: best,
                    new_quantum: quantum + ceil_div(unused, 2),
                })
            }
            Zone::ShortestJobPreemptible => {
                let best =
                    select_min(ready.iter(), |position, id| SelectionKey::ShortestRemaining {
                        remaining: self.processes[id].remaining,
                        position,
                    })?;
                log_checks!(
                    self.verbosity,
                    "[t={}] zone 3: {} (remaining {}) vs shortest ready {} (remaining {})",
                    now,
                    running.name,
                    running.remaining,
                    self.processes[best].name,
                    self.processes[best].remaining
                );
                (self.processes[best].remaining < running.remaining).then(|| Preemption {
                    next: best,
                    new_quantum: quantum + unused,
                })
            }
        }
    }

    fn quantum(&self, id: ProcessId) -> Tick {
        self.processes[id]
            .quantum
            .as_ref()
            .map_or(0, |ledger| ledger.current())
    }

    fn ledger_mut(&mut self, id: ProcessId) -> Option<&mut QuantumLedger> {
        self.processes[id].quantum.as_mut()
    }
}

/// Clock, queues and trace for one AG run.
struct AgRun {
    arrivals: ArrivalQueue,
    ready: ReadyQueue,
    trace: ExecutionTrace,
    now: Tick,
    /// Process dispatched most recently; reset when the CPU idles.
    last: Option<ProcessId>,
}

impl AgRun {
    fn admit(&mut self, processes: &[Process]) {
        self.ready
            .extend(self.arrivals.admit(processes, self.now).iter().copied());
    }
}
