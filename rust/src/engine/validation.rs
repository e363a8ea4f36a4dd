//! Up-front input checks and the engine error type.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::models::{ProcessSpec, Tick};

/// Errors that can occur before a simulation starts.
///
/// Once a simulation has begun it always runs to completion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid process spec {name:?}: {reason}")]
    InvalidProcessSpec { name: String, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Scenario contains no processes")]
    EmptyScenario,
}

/// Whether the AG initial quantum must be present on every spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantumRule {
    Ignore,
    Require,
}

fn invalid_spec(spec: &ProcessSpec, reason: &str) -> SimulationError {
    SimulationError::InvalidProcessSpec {
        name: spec.name.clone(),
        reason: reason.to_string(),
    }
}

/// Validate a process list.
///
/// Returns `EmptyScenario` for an empty list; engines treat that case as a
/// degenerate success, see [`accept_processes`].
pub fn validate_processes(specs: &[ProcessSpec]) -> Result<(), SimulationError> {
    check_processes(specs, QuantumRule::Ignore)
}

pub(crate) fn check_processes(
    specs: &[ProcessSpec],
    quantum_rule: QuantumRule,
) -> Result<(), SimulationError> {
    if specs.is_empty() {
        return Err(SimulationError::EmptyScenario);
    }

    let mut seen: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(specs.len(), Default::default());
    for spec in specs {
        if spec.name.is_empty() {
            return Err(invalid_spec(spec, "name must not be empty"));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(invalid_spec(spec, "duplicate process name"));
        }
        if spec.arrival < 0 {
            return Err(invalid_spec(spec, "arrival must be >= 0"));
        }
        if spec.burst <= 0 {
            return Err(invalid_spec(spec, "burst must be > 0"));
        }
        if quantum_rule == QuantumRule::Require {
            match spec.quantum {
                Some(q) if q > 0 => {}
                Some(q) => {
                    return Err(SimulationError::InvalidConfig(format!(
                        "initial AG quantum for {:?} must be > 0, got {}",
                        spec.name, q
                    )))
                }
                None => {
                    return Err(SimulationError::InvalidConfig(format!(
                        "process {:?} has no initial AG quantum",
                        spec.name
                    )))
                }
            }
        }
    }
    Ok(())
}

/// Validate processes for an engine, letting an empty list through.
pub(crate) fn accept_processes(
    specs: &[ProcessSpec],
    quantum_rule: QuantumRule,
) -> Result<(), SimulationError> {
    match check_processes(specs, quantum_rule) {
        Ok(()) | Err(SimulationError::EmptyScenario) => Ok(()),
        Err(e) => Err(e),
    }
}

pub(crate) fn check_context_switch(context_switch: Tick) -> Result<(), SimulationError> {
    if context_switch < 0 {
        return Err(SimulationError::InvalidConfig(format!(
            "context switch cost must be >= 0, got {}",
            context_switch
        )));
    }
    Ok(())
}

pub(crate) fn check_rr_quantum(quantum: Tick) -> Result<(), SimulationError> {
    if quantum <= 0 {
        return Err(SimulationError::InvalidConfig(format!(
            "round-robin quantum must be > 0, got {}",
            quantum
        )));
    }
    Ok(())
}

pub(crate) fn check_aging_interval(aging_interval: Tick) -> Result<(), SimulationError> {
    if aging_interval < 0 {
        return Err(SimulationError::InvalidConfig(format!(
            "aging interval must be >= 0, got {}",
            aging_interval
        )));
    }
    Ok(())
}
