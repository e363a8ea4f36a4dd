//! Core data types exchanged with callers: process specs and simulation results.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Simulated time, in abstract ticks.
pub type Tick = i64;

/// Immutable description of one process, as supplied by a scenario loader.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub arrival: Tick,
    #[pyo3(get, set)]
    pub burst: Tick,
    /// Lower number = higher priority.
    #[pyo3(get, set)]
    pub priority: i32,
    /// Initial time slice, only consulted by the AG scheduler.
    #[pyo3(get, set)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Tick>,
}

impl ProcessSpec {
    /// Build a spec without an AG quantum.
    pub fn new(name: impl Into<String>, arrival: Tick, burst: Tick, priority: i32) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority,
            quantum: None,
        }
    }

    /// Attach an initial AG quantum.
    pub fn with_quantum(mut self, quantum: Tick) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

#[pymethods]
impl ProcessSpec {
    #[new]
    #[pyo3(signature = (name, arrival, burst, priority, quantum=None))]
    fn py_new(
        name: String,
        arrival: Tick,
        burst: Tick,
        priority: i32,
        quantum: Option<Tick>,
    ) -> Self {
        Self {
            name,
            arrival,
            burst,
            priority,
            quantum,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ProcessSpec(name={:?}, arrival={}, burst={}, priority={}, quantum={:?})",
            self.name, self.arrival, self.burst, self.priority, self.quantum
        )
    }
}

/// Final timing for one process.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub waiting_time: Tick,
    #[pyo3(get)]
    pub turnaround_time: Tick,
    /// Every quantum value the process held, AG only.
    #[pyo3(get)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_history: Option<Vec<Tick>>,
}

#[pymethods]
impl ProcessResult {
    fn __repr__(&self) -> String {
        format!(
            "ProcessResult(name={:?}, waiting={}, turnaround={}, quantum_history={:?})",
            self.name, self.waiting_time, self.turnaround_time, self.quantum_history
        )
    }
}

/// Result of one simulation run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// One entry per contiguous run of a process.
    #[pyo3(get)]
    pub execution_order: Vec<String>,
    /// Per-process results, in input order.
    #[pyo3(get)]
    pub process_results: Vec<ProcessResult>,
    #[pyo3(get)]
    pub average_waiting_time: f64,
    #[pyo3(get)]
    pub average_turnaround_time: f64,
}

impl SimulationResult {
    /// Result for a scenario with no processes.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[pymethods]
impl SimulationResult {
    /// Look up a process result by name.
    pub fn get(&self, name: &str) -> Option<ProcessResult> {
        self.process_results.iter().find(|r| r.name == name).cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationResult(order={:?}, avg_waiting={:.2}, avg_turnaround={:.2})",
            self.execution_order, self.average_waiting_time, self.average_turnaround_time
        )
    }
}
