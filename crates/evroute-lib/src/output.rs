//! Textual rendering of planned routes and fleet reports.
//!
//! JSON consumers serialise [`RoutePlan`] and [`FleetReport`] directly; the
//! helpers here produce the plain-text report: the settled path printed from
//! destination back to source, charging stops, and the timing lines.

use std::fmt::Write;

use crate::fleet::{FleetReport, VehicleOutcome};
use crate::planner::RoutePlan;

/// Render a single plan as plain text.
pub fn render_route(plan: &RoutePlan) -> String {
    let mut out = String::new();
    write_route(&mut out, plan);
    out
}

/// Render a whole fleet report as plain text.
pub fn render_fleet(report: &FleetReport) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        match outcome {
            VehicleOutcome::Planned { plan } => write_route(&mut out, plan),
            VehicleOutcome::Failed {
                vehicle_id,
                start,
                goal,
                reason,
            } => {
                let _ = writeln!(out, "EV {vehicle_id}: {start} -> {goal} failed: {reason}");
            }
        }
    }
    let _ = writeln!(
        out,
        "Execution time for the fleet: {:.6} seconds",
        report.total_time
    );
    let _ = writeln!(
        out,
        "Max time taken to plan a single vehicle: {:.6} seconds",
        report.max_planning_time
    );
    out
}

fn write_route(out: &mut String, plan: &RoutePlan) {
    // Path is reported destination-first, matching the settlement order the
    // parent pointers are unwound in.
    let _ = write!(out, "END");
    for node in plan.steps.iter().rev() {
        let _ = write!(out, " <- {node}");
    }
    let _ = writeln!(out, " (EV {})", plan.vehicle_id);

    for stop in &plan.charge_stops {
        let _ = writeln!(
            out,
            "  charged at node {} for edge {} -> {} during [{:.6}, {:.6})",
            stop.from, stop.from, stop.to, stop.window.arrival, stop.window.departure
        );
    }
    let _ = writeln!(out, "  total route time: {:.6}", plan.total_cost);
    let _ = writeln!(out, "  planned in {:.6} seconds", plan.planning_time);
}
