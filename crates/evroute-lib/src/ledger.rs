//! Shared record of committed charging windows.
//!
//! One [`ChargeLedger`] lives for a whole fleet run and is passed explicitly
//! into every planning call. Agents are planned strictly one after another,
//! so the ledger is a single-writer, sequential-readers structure: each call
//! reads the windows left by earlier agents and appends its own on success.
//! Planning order is priority order — a conflict is always resolved by making
//! the later-planned agent absorb the entire overlap as waiting time, never
//! by rescheduling an earlier one.

use std::collections::HashMap;

use serde::Serialize;

use crate::grid::NodeId;

/// Half-open interval `[arrival, departure)` during which a vehicle occupied
/// a charging slot while transiting an edge. Timestamps are wall-clock
/// seconds relative to the owning search's start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeWindow {
    pub arrival: f64,
    pub departure: f64,
}

impl ChargeWindow {
    /// Duration the two windows overlap; zero when disjoint.
    pub fn overlap(&self, other: &ChargeWindow) -> f64 {
        if self.departure <= other.arrival || other.departure <= self.arrival {
            return 0.0;
        }
        (self.departure.min(other.departure) - self.arrival.max(other.arrival)).max(0.0)
    }
}

/// Charging windows committed by previously planned vehicles, keyed by the
/// (predecessor, successor) transition they were recorded for. A later agent
/// overwrites the window stored at the same key.
#[derive(Debug, Default, Clone)]
pub struct ChargeLedger {
    windows: HashMap<(NodeId, NodeId), ChargeWindow>,
}

impl ChargeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or overwrite) the window for a transition.
    pub fn record(&mut self, from: NodeId, to: NodeId, window: ChargeWindow) {
        self.windows.insert((from, to), window);
    }

    /// Most recent window recorded for a transition, if any.
    pub fn window(&self, from: NodeId, to: NodeId) -> Option<ChargeWindow> {
        self.windows.get(&(from, to)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(arrival: f64, departure: f64) -> ChargeWindow {
        ChargeWindow { arrival, departure }
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        assert_eq!(window(0.0, 2.0).overlap(&window(2.0, 4.0)), 0.0);
        assert_eq!(window(5.0, 6.0).overlap(&window(0.0, 5.0)), 0.0);
    }

    #[test]
    fn partial_overlap_returns_intersection_length() {
        assert_eq!(window(0.0, 3.0).overlap(&window(2.0, 5.0)), 1.0);
        assert_eq!(window(2.0, 5.0).overlap(&window(0.0, 3.0)), 1.0);
    }

    #[test]
    fn containment_returns_inner_duration() {
        assert_eq!(window(1.0, 2.0).overlap(&window(0.0, 10.0)), 1.0);
    }

    #[test]
    fn record_overwrites_existing_window() {
        let mut ledger = ChargeLedger::new();
        ledger.record(0, 1, window(0.0, 2.0));
        ledger.record(0, 1, window(3.0, 4.0));
        assert_eq!(ledger.window(0, 1), Some(window(3.0, 4.0)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn missing_transitions_have_no_window() {
        let ledger = ChargeLedger::new();
        assert_eq!(ledger.window(4, 5), None);
        assert!(ledger.is_empty());
    }
}
