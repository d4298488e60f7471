//! Sequential fleet driver.
//!
//! Plans each vehicle in turn, threading one [`ChargeLedger`] through every
//! call so later vehicles see the charging commitments of earlier ones.
//! Strictly sequential execution is a design invariant: the ledger carries no
//! synchronisation, and "planning order is priority order" only holds while
//! calls never interleave.

use serde::Serialize;

use crate::grid::{NodeId, RoadGrid};
use crate::ledger::ChargeLedger;
use crate::planner::{plan_route, RoutePlan};
use crate::vehicle::{SearchClock, Vehicle};

/// Result of one vehicle's planning call within a fleet run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VehicleOutcome {
    Planned { plan: RoutePlan },
    Failed {
        vehicle_id: u32,
        start: NodeId,
        goal: NodeId,
        reason: String,
    },
}

impl VehicleOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            VehicleOutcome::Planned { plan } => Some(plan),
            VehicleOutcome::Failed { .. } => None,
        }
    }
}

/// Aggregate timing report for a fleet run.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    pub outcomes: Vec<VehicleOutcome>,
    /// Wall-clock seconds for the whole run.
    pub total_time: f64,
    /// Largest single-vehicle planning time.
    pub max_planning_time: f64,
}

impl FleetReport {
    /// Number of vehicles that received a route.
    pub fn planned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.plan().is_some())
            .count()
    }
}

/// Plan every vehicle in order against a fresh ledger.
pub fn plan_fleet(grid: &RoadGrid, vehicles: Vec<Vehicle>) -> FleetReport {
    let mut ledger = ChargeLedger::new();
    plan_fleet_with_ledger(grid, vehicles, &mut ledger)
}

/// Plan every vehicle in order, reading and extending the given ledger.
///
/// A vehicle that fails to plan is reported and skipped; it commits nothing
/// to the ledger and does not abort the rest of the fleet.
pub fn plan_fleet_with_ledger(
    grid: &RoadGrid,
    vehicles: Vec<Vehicle>,
    ledger: &mut ChargeLedger,
) -> FleetReport {
    let clock = SearchClock::start();
    let mut outcomes = Vec::with_capacity(vehicles.len());
    let mut max_planning_time = 0.0f64;

    for mut vehicle in vehicles {
        let vehicle_id = vehicle.id();
        let start = vehicle.source();
        let goal = vehicle.destination();

        match plan_route(grid, &mut vehicle, ledger) {
            Ok(plan) => {
                max_planning_time = max_planning_time.max(plan.planning_time);
                outcomes.push(VehicleOutcome::Planned { plan });
            }
            Err(error) => {
                tracing::warn!(
                    vehicle = vehicle_id,
                    start,
                    goal,
                    %error,
                    "vehicle could not be planned"
                );
                outcomes.push(VehicleOutcome::Failed {
                    vehicle_id,
                    start,
                    goal,
                    reason: error.to_string(),
                });
            }
        }
    }

    FleetReport {
        outcomes,
        total_time: clock.elapsed_secs(),
        max_planning_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::VehicleConfig;

    fn grid() -> RoadGrid {
        RoadGrid::parse("0 1 0\n1 0 1\n0 1 0\n").expect("parses")
    }

    fn vehicle(source: NodeId, destination: NodeId) -> Vehicle {
        Vehicle::new(VehicleConfig {
            source,
            destination,
            ..VehicleConfig::default()
        })
        .expect("valid parameters")
    }

    #[test]
    fn fleet_reports_every_vehicle() {
        let report = plan_fleet(&grid(), vec![vehicle(0, 2), vehicle(2, 0)]);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.planned_count(), 2);
        assert!(report.total_time >= report.max_planning_time);
    }

    #[test]
    fn failed_vehicle_does_not_abort_the_rest() {
        // Node 2 is isolated; the middle vehicle cannot be routed.
        let grid = RoadGrid::parse("0 1 0\n1 0 0\n0 0 0\n").expect("parses");
        let report = plan_fleet(&grid, vec![vehicle(0, 1), vehicle(0, 2), vehicle(1, 0)]);

        assert_eq!(report.planned_count(), 2);
        assert!(matches!(
            report.outcomes[1],
            VehicleOutcome::Failed { start: 0, goal: 2, .. }
        ));
    }
}
