//! Discrete-time CPU scheduling engines.
//!
//! Four independent engines share one process/time model: preemptive SJF,
//! Round-Robin, priority with aging, and the AG hybrid scheduler. Each engine
//! builds a private working copy of its input, so the same specs can be
//! simulated any number of times, from any number of threads.

mod admission;
pub mod ag;
mod priority;
mod process;
mod ready_queue;
mod round_robin;
mod selection;
mod sjf;
mod trace;
pub(crate) mod validation;

use std::fmt;
use std::str::FromStr;

pub use ag::AgScheduler;
pub use priority::PriorityAging;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use validation::{validate_processes, SimulationError};

use crate::config::SimulationConfig;
use crate::models::{ProcessSpec, SimulationResult, Tick};

/// Scheduling algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sjf,
    RoundRobin,
    Priority,
    Ag,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::Ag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sjf => "sjf",
            Algorithm::RoundRobin => "rr",
            Algorithm::Priority => "priority",
            Algorithm::Ag => "ag",
        }
    }

    /// Run this algorithm over `specs` with the parameters in `config`.
    pub fn simulate(
        &self,
        specs: &[ProcessSpec],
        config: &SimulationConfig,
    ) -> Result<SimulationResult, SimulationError> {
        config.validate_for(*self)?;
        let verbosity = config.verbosity;
        let result = match self {
            Algorithm::Sjf => ShortestJobFirst::new(specs, config.context_switch)?
                .with_verbosity(verbosity)
                .run(),
            Algorithm::RoundRobin => {
                RoundRobin::new(specs, config.rr_quantum, config.context_switch)?
                    .with_verbosity(verbosity)
                    .run()
            }
            Algorithm::Priority => {
                PriorityAging::new(specs, config.context_switch, config.aging_interval)?
                    .with_verbosity(verbosity)
                    .run()
            }
            Algorithm::Ag => AgScheduler::new(specs, config.context_switch)?
                .with_verbosity(verbosity)
                .run(),
        };
        Ok(result)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sjf" => Ok(Algorithm::Sjf),
            "rr" | "round_robin" => Ok(Algorithm::RoundRobin),
            "priority" => Ok(Algorithm::Priority),
            "ag" => Ok(Algorithm::Ag),
            other => Err(SimulationError::InvalidConfig(format!(
                "unknown algorithm: {}",
                other
            ))),
        }
    }
}

/// Preemptive shortest-remaining-time-first.
pub fn simulate_sjf(
    specs: &[ProcessSpec],
    context_switch: Tick,
) -> Result<SimulationResult, SimulationError> {
    Ok(ShortestJobFirst::new(specs, context_switch)?.run())
}

/// Round-Robin with block dispatch of `quantum` ticks.
pub fn simulate_round_robin(
    specs: &[ProcessSpec],
    quantum: Tick,
    context_switch: Tick,
) -> Result<SimulationResult, SimulationError> {
    Ok(RoundRobin::new(specs, quantum, context_switch)?.run())
}

/// Preemptive priority with aging (`aging_interval` 0 disables aging).
pub fn simulate_priority(
    specs: &[ProcessSpec],
    context_switch: Tick,
    aging_interval: Tick,
) -> Result<SimulationResult, SimulationError> {
    Ok(PriorityAging::new(specs, context_switch, aging_interval)?.run())
}

/// AG hybrid scheduler; every spec needs an initial quantum.
pub fn simulate_ag(
    specs: &[ProcessSpec],
    context_switch: Tick,
) -> Result<SimulationResult, SimulationError> {
    Ok(AgScheduler::new(specs, context_switch)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_spec(name: &str, arrival: Tick, burst: Tick, priority: i32, quantum: Tick) -> ProcessSpec {
        ProcessSpec::new(name, arrival, burst, priority).with_quantum(quantum)
    }

    fn scenarios() -> Vec<Vec<ProcessSpec>> {
        vec![
            vec![
                make_spec("P1", 0, 8, 3, 4),
                make_spec("P2", 1, 4, 1, 3),
                make_spec("P3", 2, 2, 4, 2),
                make_spec("P4", 3, 1, 2, 5),
                make_spec("P5", 4, 3, 5, 4),
            ],
            vec![
                make_spec("P1", 0, 17, 4, 7),
                make_spec("P2", 2, 6, 7, 9),
                make_spec("P3", 5, 11, 3, 4),
                make_spec("P4", 15, 4, 6, 6),
            ],
            vec![
                make_spec("A", 3, 5, 2, 1),
                make_spec("B", 3, 2, 2, 1),
                make_spec("C", 20, 7, 0, 3),
                make_spec("D", 21, 1, 9, 2),
            ],
        ]
    }

    fn configs() -> Vec<SimulationConfig> {
        vec![
            SimulationConfig::default(),
            SimulationConfig {
                context_switch: 1,
                rr_quantum: 3,
                aging_interval: 2,
                verbosity: 0,
            },
            SimulationConfig {
                context_switch: 2,
                rr_quantum: 1,
                aging_interval: 1,
                verbosity: 0,
            },
        ]
    }

    #[test]
    fn test_conservation_for_every_engine() {
        for specs in scenarios() {
            for config in configs() {
                for algorithm in Algorithm::ALL {
                    let result = algorithm.simulate(&specs, &config).unwrap();
                    assert_eq!(result.process_results.len(), specs.len());
                    for (spec, r) in specs.iter().zip(&result.process_results) {
                        assert_eq!(spec.name, r.name);
                        assert_eq!(r.waiting_time, r.turnaround_time - spec.burst);
                        assert!(r.waiting_time >= 0, "{} {}", algorithm, r.name);
                        assert!(r.turnaround_time >= spec.burst);
                    }
                }
            }
        }
    }

    #[test]
    fn test_averages_match_means() {
        for specs in scenarios() {
            for algorithm in Algorithm::ALL {
                let result = algorithm
                    .simulate(&specs, &SimulationConfig::default())
                    .unwrap();
                let n = result.process_results.len() as f64;
                let wait: f64 = result
                    .process_results
                    .iter()
                    .map(|r| r.waiting_time as f64)
                    .sum();
                let tat: f64 = result
                    .process_results
                    .iter()
                    .map(|r| r.turnaround_time as f64)
                    .sum();
                assert!((result.average_waiting_time - wait / n).abs() < 0.01);
                assert!((result.average_turnaround_time - tat / n).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_deterministic_reruns() {
        for specs in scenarios() {
            for config in configs() {
                for algorithm in Algorithm::ALL {
                    let first = algorithm.simulate(&specs, &config).unwrap();
                    let second = algorithm.simulate(&specs, &config).unwrap();
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn test_execution_order_has_no_consecutive_duplicates() {
        for specs in scenarios() {
            for config in configs() {
                for algorithm in Algorithm::ALL {
                    let result = algorithm.simulate(&specs, &config).unwrap();
                    for pair in result.execution_order.windows(2) {
                        assert_ne!(pair[0], pair[1], "{}", algorithm);
                    }
                }
            }
        }
    }

    #[test]
    fn test_only_ag_reports_quantum_history() {
        let specs = &scenarios()[0];
        for algorithm in Algorithm::ALL {
            let result = algorithm
                .simulate(specs, &SimulationConfig::default())
                .unwrap();
            let has_history = result
                .process_results
                .iter()
                .all(|r| r.quantum_history.is_some());
            assert_eq!(has_history, algorithm == Algorithm::Ag, "{}", algorithm);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        for algorithm in Algorithm::ALL {
            let result = algorithm.simulate(&[], &SimulationConfig::default()).unwrap();
            assert!(result.execution_order.is_empty());
            assert_eq!(result.average_waiting_time, 0.0);
            assert_eq!(result.average_turnaround_time, 0.0);
        }
    }

    #[test]
    fn test_single_process_boundary() {
        let specs = vec![make_spec("Solo", 2, 5, 3, 2)];
        let config = SimulationConfig {
            context_switch: 4,
            rr_quantum: 2,
            aging_interval: 1,
            verbosity: 0,
        };
        for algorithm in Algorithm::ALL {
            let result = algorithm.simulate(&specs, &config).unwrap();
            assert_eq!(result.execution_order, vec!["Solo"], "{}", algorithm);
            assert_eq!(result.process_results[0].waiting_time, 0);
            assert_eq!(result.process_results[0].turnaround_time, 5);
        }
    }

    #[test]
    fn test_invalid_spec_fails_before_running() {
        let specs = vec![make_spec("A", 0, 3, 1, 2), make_spec("A", 1, 2, 1, 2)];
        for algorithm in Algorithm::ALL {
            assert!(matches!(
                algorithm.simulate(&specs, &SimulationConfig::default()),
                Err(SimulationError::InvalidProcessSpec { .. })
            ));
        }
    }

    #[test]
    fn test_config_checked_before_processes() {
        let specs = vec![make_spec("A", 0, 0, 1, 2)];
        let config = SimulationConfig {
            context_switch: -1,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Algorithm::Sjf.simulate(&specs, &config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_free_functions_match_algorithm_dispatch() {
        let specs = &scenarios()[1];
        let config = &configs()[1];
        assert_eq!(
            simulate_sjf(specs, config.context_switch).unwrap(),
            Algorithm::Sjf.simulate(specs, config).unwrap()
        );
        assert_eq!(
            simulate_round_robin(specs, config.rr_quantum, config.context_switch).unwrap(),
            Algorithm::RoundRobin.simulate(specs, config).unwrap()
        );
        assert_eq!(
            simulate_priority(specs, config.context_switch, config.aging_interval).unwrap(),
            Algorithm::Priority.simulate(specs, config).unwrap()
        );
        assert_eq!(
            simulate_ag(specs, config.context_switch).unwrap(),
            Algorithm::Ag.simulate(specs, config).unwrap()
        );
    }

    #[test]
    fn test_engines_run_in_parallel_threads() {
        let specs = scenarios().remove(1);
        let expected = Algorithm::Ag
            .simulate(&specs, &SimulationConfig::default())
            .unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let specs = specs.clone();
                std::thread::spawn(move || {
                    Algorithm::Ag
                        .simulate(&specs, &SimulationConfig::default())
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SJF".parse::<Algorithm>().unwrap(), Algorithm::Sjf);
        assert_eq!("round_robin".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!("rr".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!(" ag ".parse::<Algorithm>().unwrap(), Algorithm::Ag);
        assert!(matches!(
            "fifo".parse::<Algorithm>(),
            Err(SimulationError::InvalidConfig(_))
        ));
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }
}
