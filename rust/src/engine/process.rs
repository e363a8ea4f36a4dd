//! Working-copy process records.
//!
//! Every engine run builds its own `Vec<Process>` from immutable specs, so the
//! same input can be fed to any number of runs without cross-run mutation.

use crate::models::{ProcessSpec, Tick};

/// Index of a process within a run's working set (input order).
pub type ProcessId = usize;

/// AG scheduling extension: current quantum plus every value it has held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantumLedger {
    current: Tick,
    history: Vec<Tick>,
}

impl QuantumLedger {
    pub fn new(initial: Tick) -> Self {
        Self {
            current: initial,
            history: vec![initial],
        }
    }

    #[inline]
    pub fn current(&self) -> Tick {
        self.current
    }

    pub fn history(&self) -> &[Tick] {
        &self.history
    }

    /// Set a new quantum and record it.
    pub fn grow_to(&mut self, quantum: Tick) {
        self.current = quantum;
        self.history.push(quantum);
    }

    /// Grow by a fixed increment and record it.
    pub fn grow_by(&mut self, increment: Tick) {
        self.grow_to(self.current + increment);
    }

    /// Zero the quantum at completion. Only ever called once.
    pub fn retire(&mut self) {
        debug_assert!(self.current != 0, "quantum retired twice");
        self.grow_to(0);
    }
}

/// Mutable simulation state for one process.
#[derive(Clone, Debug)]
pub struct Process {
    pub name: String,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: i32,
    pub remaining: Tick,
    pub waiting: Tick,
    pub turnaround: Tick,
    pub completion: Option<Tick>,
    /// Tick at which the process last entered the ready set or last ran.
    pub ready_since: Tick,
    pub quantum: Option<QuantumLedger>,
}

impl Process {
    fn from_spec(spec: &ProcessSpec, with_quantum: bool) -> Self {
        Self {
            name: spec.name.clone(),
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            remaining: spec.burst,
            waiting: 0,
            turnaround: 0,
            completion: None,
            ready_since: spec.arrival,
            quantum: if with_quantum {
                spec.quantum.map(QuantumLedger::new)
            } else {
                None
            },
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Consume `ticks` units of work.
    pub fn execute(&mut self, ticks: Tick) {
        debug_assert!(ticks > 0 && ticks <= self.remaining);
        self.remaining -= ticks;
    }

    /// Record completion at `now` and derive turnaround and waiting.
    pub fn finish(&mut self, now: Tick) {
        debug_assert!(self.completion.is_none(), "{} finished twice", self.name);
        debug_assert_eq!(self.remaining, 0);
        self.completion = Some(now);
        self.turnaround = now - self.arrival;
        self.waiting = self.turnaround - self.burst;
        if let Some(ledger) = self.quantum.as_mut() {
            ledger.retire();
        }
    }
}

/// Build a fresh working set from specs.
///
/// `with_quantum` attaches a [`QuantumLedger`] to every process that carries an
/// initial quantum.
pub fn fresh_working_set(specs: &[ProcessSpec], with_quantum: bool) -> Vec<Process> {
    specs
        .iter()
        .map(|spec| Process::from_spec(spec, with_quantum))
        .collect()
}
