//! Rust implementation of the CPU scheduling simulator.
//!
//! This module provides deterministic discrete-time simulations of preemptive
//! SJF, Round-Robin, priority-with-aging and the AG hybrid scheduler, plus the
//! Python bindings used by the scenario runner.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

mod config;
pub mod engine;
pub mod logging;
mod models;
pub mod scenario;

pub use config::SimulationConfig;
pub use engine::{
    simulate_ag, simulate_priority, simulate_round_robin, simulate_sjf, validate_processes,
    AgScheduler, Algorithm, PriorityAging, RoundRobin, ShortestJobFirst, SimulationError,
};
pub use models::{ProcessResult, ProcessSpec, SimulationResult, Tick};
pub use scenario::Scenario;

fn to_py_err(err: SimulationError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Simulate one scheduling algorithm.
///
/// # Arguments
/// * `algorithm` - "sjf", "rr" (or "round_robin"), "priority" or "ag"
/// * `processes` - Process specs; AG requires a quantum on each
/// * `config` - Context switch, RR quantum, aging interval and verbosity
///
/// # Returns
/// * SimulationResult with execution order, per-process timings and averages
///
/// # Raises
/// * ValueError for an unknown algorithm, invalid config or invalid process spec
#[pyfunction]
#[pyo3(name = "simulate", signature = (algorithm, processes, config=None))]
fn py_simulate(
    algorithm: &str,
    processes: Vec<ProcessSpec>,
    config: Option<SimulationConfig>,
) -> PyResult<SimulationResult> {
    let algorithm: Algorithm = algorithm.parse().map_err(to_py_err)?;
    let config = config.unwrap_or_default();
    algorithm.simulate(&processes, &config).map_err(to_py_err)
}

/// Simulate every applicable algorithm over the same processes.
///
/// AG is included only when every process carries a quantum.
///
/// # Returns
/// * Dict mapping algorithm name to its SimulationResult
///
/// # Raises
/// * ValueError if any run rejects its input
#[pyfunction]
#[pyo3(name = "simulate_all", signature = (processes, config=None))]
fn py_simulate_all(
    processes: Vec<ProcessSpec>,
    config: Option<SimulationConfig>,
) -> PyResult<HashMap<String, SimulationResult>> {
    let scenario = Scenario::new(processes, config.unwrap_or_default());
    let results = scenario.run_all().map_err(to_py_err)?;
    Ok(results
        .into_iter()
        .map(|(algorithm, result)| (algorithm.name().to_string(), result))
        .collect())
}

/// Check a process list without simulating it.
///
/// # Raises
/// * ValueError for an empty list or an invalid spec
#[pyfunction]
#[pyo3(name = "validate_processes")]
fn py_validate_processes(processes: Vec<ProcessSpec>) -> PyResult<()> {
    validate_processes(&processes).map_err(to_py_err)
}

/// The schedsim.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<ProcessSpec>()?;
    m.add_class::<ProcessResult>()?;
    m.add_class::<SimulationResult>()?;

    // Config types
    m.add_class::<SimulationConfig>()?;

    // Engines
    m.add_function(wrap_pyfunction!(py_simulate, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate_all, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_processes, m)?)?;

    Ok(())
}
