//! Selection keys for picking the next process.
//!
//! Each engine ranks candidates with one variant of [`SelectionKey`]; the key
//! carries its tie-break fields so the winner never depends on container
//! iteration order. Lower keys win.

use super::process::ProcessId;
use crate::models::Tick;

/// Ranking key for a candidate process. Lower = selected first.
///
/// Keys are only ever compared within one variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SelectionKey<'a> {
    /// SJF / AG zone 3: (remaining, position)
    ShortestRemaining { remaining: Tick, position: usize },
    /// AG zone 2: (priority, position)
    BestPriority { priority: i32, position: usize },
    /// Priority engine: (effective priority, arrival, name)
    EffectivePriority {
        priority: i64,
        arrival: Tick,
        name: &'a str,
    },
}

/// Pick the candidate with the smallest key.
///
/// `key` receives each candidate's position in iteration order and its id.
pub fn select_min<'a, I, F>(candidates: I, mut key: F) -> Option<ProcessId>
where
    I: IntoIterator<Item = ProcessId>,
    F: FnMut(usize, ProcessId) -> SelectionKey<'a>,
{
    candidates
        .into_iter()
        .enumerate()
        .map(|(position, id)| (key(position, id), id))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, id)| id)
}

/// Priority after aging: one step better per full `aging_interval` waited,
/// floored at 0. An interval of 0 disables aging.
pub fn effective_priority(priority: i32, waited: Tick, aging_interval: Tick) -> i64 {
    let base = i64::from(priority);
    if aging_interval <= 0 {
        return base;
    }
    (base - waited.max(0) / aging_interval).max(0)
}
