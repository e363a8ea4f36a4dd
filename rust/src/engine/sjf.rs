//! Preemptive Shortest-Job-First (shortest remaining time) engine.

use super::admission::arrival_order;
use super::process::{fresh_working_set, Process, ProcessId};
use super::selection::{select_min, SelectionKey};
use super::trace::ExecutionTrace;
use super::validation::{accept_processes, check_context_switch, QuantumRule, SimulationError};
use crate::models::{ProcessSpec, SimulationResult, Tick};
use crate::{log_changes, log_checks, log_debug};

/// Preemptive SJF: every tick runs the arrived process with the least
/// remaining work.
pub struct ShortestJobFirst {
    processes: Vec<Process>,
    context_switch: Tick,
    verbosity: u8,
}

impl ShortestJobFirst {
    /// Validate input and build a fresh working set.
    pub fn new(specs: &[ProcessSpec], context_switch: Tick) -> Result<Self, SimulationError> {
        check_context_switch(context_switch)?;
        accept_processes(specs, QuantumRule::Ignore)?;
        Ok(Self {
            processes: fresh_working_set(specs, false),
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
        let order = arrival_order(&self.processes);
        let mut trace = ExecutionTrace::new();
        let mut now: Tick = 0;
        let mut last: Option<ProcessId> = None;
        let mut completed = 0;

        while completed < self.processes.len() {
            let Some(current) = self.pick(&order, now) else {
                log_debug!(self.verbosity, "[t={}] idle", now);
                now += 1;
                last = None;
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
            last = Some(current);
            log_debug!(
                self.verbosity,
                "[t={}] {} ran, remaining={}",
                now,
                process.name,
                process.remaining
            );

            if process.is_complete() {
                process.finish(now);
                completed += 1;
                log_changes!(self.verbosity, "[t={}] {} completed", now, process.name);
            }
        }

        trace.into_result(&self.processes)
    }

    /// Shortest remaining time among arrived, unfinished processes.
    fn pick(&self, order: &[ProcessId], now: Tick) -> Option<ProcessId> {
        let eligible = order.iter().copied().filter(|&id| {
            let p = &self.processes[id];
            p.arrival <= now && !p.is_complete()
        });
        let picked = select_min(eligible, |position, id| SelectionKey::ShortestRemaining {
            remaining: self.processes[id].remaining,
            position,
        });
        if let Some(id) = picked {
            log_checks!(
                self.verbosity,
                "[t={}] shortest remaining: {} ({})",
                now,
                self.processes[id].name,
                self.processes[id].remaining
            );
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_spec(name: &str, arrival: Tick, burst: Tick, priority: i32) -> ProcessSpec {
        ProcessSpec::new(name, arrival, burst, priority)
    }

    fn reference_processes() -> Vec<ProcessSpec> {
        vec![
            make_spec("P1", 0, 8, 3),
            make_spec("P2", 1, 4, 1),
            make_spec("P3", 2, 2, 4),
            make_spec("P4", 3, 1, 2),
            make_spec("P5", 4, 3, 5),
        ]
    }

    fn timings(result: &SimulationResult) -> Vec<(String, Tick, Tick)> {
        result
            .process_results
            .iter()
            .map(|r| (r.name.clone(), r.waiting_time, r.turnaround_time))
            .collect()
    }

    #[test]
    fn test_reference_scenario_with_context_switch() {
        let result = ShortestJobFirst::new(&reference_processes(), 1)
            .unwrap()
            .run();

        assert_eq!(
            result.execution_order,
            vec!["P1", "P2", "P4", "P3", "P2", "P5", "P1"]
        );
        assert_eq!(
            timings(&result),
            vec![
                ("P1".to_string(), 16, 24),
                ("P2".to_string(), 7, 11),
                ("P3".to_string(), 4, 6),
                ("P4".to_string(), 1, 2),
                ("P5".to_string(), 9, 12),
            ]
        );
        assert!((result.average_waiting_time - 7.4).abs() < 0.01);
        assert!((result.average_turnaround_time - 11.0).abs() < 0.01);
    }

    #[test]
    fn test_reference_scenario_without_context_switch() {
        let result = ShortestJobFirst::new(&reference_processes(), 0)
            .unwrap()
            .run();

        assert_eq!(
            result.execution_order,
            vec!["P1", "P2", "P3", "P4", "P2", "P5", "P1"]
        );
        assert_eq!(result.get("P3").map(|r| r.waiting_time), Some(0));
        assert!((result.average_waiting_time - 3.6).abs() < 0.01);
        assert!((result.average_turnaround_time - 7.2).abs() < 0.01);
    }

    #[test]
    fn test_equal_remaining_keeps_incumbent_order() {
        let specs = vec![make_spec("A", 0, 3, 1), make_spec("B", 0, 3, 1)];
        let result = ShortestJobFirst::new(&specs, 0).unwrap().run();
        assert_eq!(result.execution_order, vec!["A", "B"]);
        assert_eq!(result.get("B").map(|r| r.waiting_time), Some(3));
    }

    #[test]
    fn test_idle_gap_charges_no_switch() {
        let specs = vec![make_spec("A", 0, 2, 2), make_spec("B", 5, 3, 1)];
        let result = ShortestJobFirst::new(&specs, 2).unwrap().run();
        assert_eq!(result.execution_order, vec!["A", "B"]);
        assert_eq!(result.get("B").map(|r| r.turnaround_time), Some(3));
        assert_eq!(result.average_waiting_time, 0.0);
    }

    #[test]
    fn test_input_order_preserved_in_results() {
        let specs = vec![make_spec("Late", 4, 1, 1), make_spec("Early", 0, 2, 1)];
        let result = ShortestJobFirst::new(&specs, 0).unwrap().run();
        assert_eq!(result.process_results[0].name, "Late");
        assert_eq!(result.execution_order, vec!["Early", "Late"]);
    }

    #[test]
    fn test_rejects_negative_context_switch() {
        assert!(matches!(
            ShortestJobFirst::new(&reference_processes(), -1),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
