//! A process list plus parameters, runnable under every algorithm.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::engine::{Algorithm, SimulationError};
use crate::models::{ProcessSpec, SimulationResult};

/// Input for one comparison run, in the shape of the reference datasets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub processes: Vec<ProcessSpec>,
    #[serde(flatten)]
    pub config: SimulationConfig,
}

impl Scenario {
    pub fn new(processes: Vec<ProcessSpec>, config: SimulationConfig) -> Self {
        Self { processes, config }
    }

    /// AG needs an initial quantum on every process.
    pub fn supports(&self, algorithm: Algorithm) -> bool {
        match algorithm {
            Algorithm::Ag => self.processes.iter().all(|p| p.quantum.is_some()),
            _ => true,
        }
    }

    pub fn run(&self, algorithm: Algorithm) -> Result<SimulationResult, SimulationError> {
        algorithm.simulate(&self.processes, &self.config)
    }

    /// Run every supported algorithm over the same input.
    ///
    /// Each run builds its own working copy, so results are independent of
    /// the order the algorithms run in.
    pub fn run_all(&self) -> Result<Vec<(Algorithm, SimulationResult)>, SimulationError> {
        Algorithm::ALL
            .into_iter()
            .filter(|&algorithm| self.supports(algorithm))
            .map(|algorithm| self.run(algorithm).map(|result| (algorithm, result)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_scenario() -> Scenario {
        Scenario::new(
            vec![
                ProcessSpec::new("P1", 0, 8, 3),
                ProcessSpec::new("P2", 1, 4, 1),
                ProcessSpec::new("P3", 2, 2, 4),
                ProcessSpec::new("P4", 3, 1, 2),
                ProcessSpec::new("P5", 4, 3, 5),
            ],
            SimulationConfig {
                context_switch: 1,
                rr_quantum: 2,
                aging_interval: 5,
                verbosity: 0,
            },
        )
    }

    #[test]
    fn test_run_all_skips_ag_without_quanta() {
        let results = reference_scenario().run_all().unwrap();
        let algorithms: Vec<Algorithm> = results.iter().map(|(a, _)| *a).collect();
        assert_eq!(
            algorithms,
            vec![Algorithm::Sjf, Algorithm::RoundRobin, Algorithm::Priority]
        );

        let sjf = &results[0].1;
        assert_eq!(
            sjf.execution_order,
            vec!["P1", "P2", "P4", "P3", "P2", "P5", "P1"]
        );
    }

    #[test]
    fn test_run_all_matches_individual_runs() {
        let scenario = reference_scenario();
        for (algorithm, result) in scenario.run_all().unwrap() {
            assert_eq!(result, scenario.run(algorithm).unwrap());
        }
    }

    #[test]
    fn test_run_all_includes_ag_when_quanta_present() {
        let scenario = Scenario::new(
            vec![
                ProcessSpec::new("A", 0, 3, 1).with_quantum(4),
                ProcessSpec::new("B", 0, 3, 1).with_quantum(4),
            ],
            SimulationConfig::default(),
        );
        let results = scenario.run_all().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[3].0, Algorithm::Ag);
        assert_eq!(results[3].1.execution_order, vec!["A", "B"]);
    }

    #[test]
    fn test_run_all_propagates_errors() {
        let scenario = Scenario::new(
            vec![ProcessSpec::new("A", 0, 3, 1)],
            SimulationConfig {
                rr_quantum: 0,
                ..SimulationConfig::default()
            },
        );
        assert!(matches!(
            scenario.run_all(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deserialize_dataset_input() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "contextSwitch": 1,
                "rrQuantum": 2,
                "agingInterval": 5,
                "processes": [
                    {"name": "P1", "arrival": 0, "burst": 8, "priority": 3},
                    {"name": "P2", "arrival": 1, "burst": 4, "priority": 1},
                    {"name": "P3", "arrival": 2, "burst": 2, "priority": 4},
                    {"name": "P4", "arrival": 3, "burst": 1, "priority": 2},
                    {"name": "P5", "arrival": 4, "burst": 3, "priority": 5}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario, reference_scenario());
    }
}
