//! Configuration types for the simulation engines.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::{validation, Algorithm, SimulationError};
use crate::models::Tick;

/// Scalar parameters shared by every engine.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Ticks charged whenever the CPU switches to a different process
    #[pyo3(get, set)]
    pub context_switch: Tick,
    /// Time slice for Round-Robin
    #[pyo3(get, set)]
    pub rr_quantum: Tick,
    /// Ticks of waiting per one-step priority boost (0 disables aging)
    #[pyo3(get, set)]
    pub aging_interval: Tick,
    /// Logging verbosity (0-3), see `crate::logging`
    #[pyo3(get, set)]
    #[serde(skip)]
    pub verbosity: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            context_switch: 0,
            rr_quantum: 2,
            aging_interval: 0,
            verbosity: 0,
        }
    }
}

impl SimulationConfig {
    /// Check only the parameters `algorithm` actually reads.
    pub fn validate_for(&self, algorithm: Algorithm) -> Result<(), SimulationError> {
        validation::check_context_switch(self.context_switch)?;
        match algorithm {
            Algorithm::RoundRobin => validation::check_rr_quantum(self.rr_quantum),
            Algorithm::Priority => validation::check_aging_interval(self.aging_interval),
            Algorithm::Sjf | Algorithm::Ag => Ok(()),
        }
    }
}

#[pymethods]
impl SimulationConfig {
    #[new]
    #[pyo3(signature = (
        context_switch=None,
        rr_quantum=None,
        aging_interval=None,
        verbosity=None
    ))]
    fn new(
        context_switch: Option<Tick>,
        rr_quantum: Option<Tick>,
        aging_interval: Option<Tick>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            context_switch: context_switch.unwrap_or(defaults.context_switch),
            rr_quantum: rr_quantum.unwrap_or(defaults.rr_quantum),
            aging_interval: aging_interval.unwrap_or(defaults.aging_interval),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(context_switch={}, rr_quantum={}, aging_interval={})",
            self.context_switch, self.rr_quantum, self.aging_interval
        )
    }
}
