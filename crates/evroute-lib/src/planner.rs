//! Space-Time A* planner for a single vehicle.
//!
//! A modified best-first search over the road grid using time as cost. The
//! per-node cost field always stores g+h, so each relaxation first recovers
//! the accumulated travel+charge time by subtracting the settled node's
//! heuristic, then adds the step's travel time, the new heuristic, any
//! charging delay, and any conflict wait derived from the shared
//! [`ChargeLedger`]. The search halts the moment the destination is selected
//! as the cheapest frontier node.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::{NodeId, RoadGrid};
use crate::heuristic::{select_min, true_heuristic};
use crate::ledger::{ChargeLedger, ChargeWindow};
use crate::vehicle::{ChargeNeed, SearchClock, Vehicle};

/// Charging event committed along a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeStop {
    /// Node where the vehicle charged before departing.
    pub from: NodeId,
    /// Node the charge was needed to reach.
    pub to: NodeId,
    pub window: ChargeWindow,
}

/// Planned route for one vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub vehicle_id: u32,
    pub start: NodeId,
    pub goal: NodeId,
    /// Node sequence from start to goal.
    pub steps: Vec<NodeId>,
    /// Charging events along `steps`, in travel order.
    pub charge_stops: Vec<ChargeStop>,
    /// Total simulated time for the route: travel plus charging plus any
    /// conflict waits absorbed from earlier-planned vehicles.
    pub total_cost: f64,
    /// Wall-clock seconds this planning call took.
    pub planning_time: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Plan a time-optimal route for `vehicle`, consulting the charging windows
/// committed by earlier-planned vehicles and appending this vehicle's own
/// windows on success. A failed call leaves both the ledger and the battery
/// commitments of earlier agents untouched.
pub fn plan_route(
    grid: &RoadGrid,
    vehicle: &mut Vehicle,
    ledger: &mut ChargeLedger,
) -> Result<RoutePlan> {
    let source = vehicle.source();
    let destination = vehicle.destination();
    grid.check_node(source)?;
    grid.check_node(destination)?;

    let vehicle_id = vehicle.id();
    let route_not_found = move || Error::RouteNotFound {
        vehicle: vehicle_id,
        start: source,
        goal: destination,
    };

    let clock = SearchClock::start();
    let heuristic = true_heuristic(grid, vehicle, destination);

    // An unreachable destination shows up as a missing heuristic at the
    // source; detect it before expanding anything.
    if heuristic[source].is_none() {
        return Err(route_not_found());
    }

    let nodes = grid.node_count();
    let mut dist: Vec<Option<f64>> = vec![None; nodes];
    let mut parent: Vec<Option<NodeId>> = vec![None; nodes];
    let mut settled = vec![false; nodes];
    // Candidate charging windows discovered during this agent's own
    // relaxations, keyed by the transition they belong to.
    let mut tentative: HashMap<(NodeId, NodeId), ChargeWindow> = HashMap::new();
    // Windows committed at settlement, buffered locally and flushed into the
    // shared ledger only once the destination is reached.
    let mut committed: Vec<(NodeId, NodeId, ChargeWindow)> = Vec::new();

    dist[source] = Some(heuristic[source].unwrap_or(0.0));

    let total_cost = loop {
        let Some(u) = select_min(&dist, &settled) else {
            // Frontier exhausted: every remaining path is battery-infeasible
            // or the destination was never reachable to begin with.
            return Err(route_not_found());
        };
        if u == destination {
            // h is zero at the destination, so the stored g+h is the true
            // accumulated travel+charge+wait time.
            break dist[u].unwrap_or(0.0);
        }
        settled[u] = true;

        if let Some(p) = parent[u] {
            if let Some(window) = tentative.get(&(p, u)).copied() {
                tracing::debug!(
                    vehicle = vehicle.id(),
                    from = p,
                    to = u,
                    arrival = window.arrival,
                    departure = window.departure,
                    "charging committed at settlement"
                );
                committed.push((p, u, window));
                vehicle.apply_edge(grid.distance(p, u));
            }
        }

        let (Some(cost_u), Some(h_u)) = (dist[u], heuristic[u]) else {
            continue;
        };
        let g_u = cost_u - h_u;

        for (v, distance) in grid.neighbours(u) {
            if settled[v] {
                continue;
            }
            let Some(h_v) = heuristic[v] else {
                continue;
            };

            let need = vehicle.charge_need(distance);
            if need == ChargeNeed::Infeasible {
                continue;
            }
            let charge = need.duration();

            let mut candidate = g_u + vehicle.travel_time(distance) + h_v + charge;
            let mut window = None;
            if charge > 0.0 {
                let arrival = clock.elapsed_secs();
                let own = ChargeWindow {
                    arrival,
                    departure: arrival + charge,
                };
                if let Some(existing) = ledger.window(u, v) {
                    let wait = own.overlap(&existing);
                    if wait > 0.0 {
                        tracing::debug!(
                            vehicle = vehicle.id(),
                            from = u,
                            to = v,
                            wait,
                            "charging slot conflict, absorbing wait"
                        );
                    }
                    candidate += wait;
                }
                window = Some(own);
            }

            if dist[v].is_none_or(|current| candidate < current) {
                dist[v] = Some(candidate);
                parent[v] = Some(u);
                match window {
                    Some(own) => {
                        tentative.insert((u, v), own);
                    }
                    None => {
                        tentative.remove(&(u, v));
                    }
                }
            }
        }
    };

    let steps = reconstruct_path(&parent, source, destination).ok_or_else(route_not_found)?;

    for &(from, to, window) in &committed {
        ledger.record(from, to, window);
    }

    // Charging stops on the final path, in travel order. The last hop into
    // the destination never commits a window because the search halts before
    // the destination is settled.
    let charge_stops = steps
        .windows(2)
        .filter_map(|pair| {
            committed
                .iter()
                .find(|&&(from, to, _)| from == pair[0] && to == pair[1])
                .map(|&(from, to, window)| ChargeStop { from, to, window })
        })
        .collect();

    let planning_time = clock.elapsed_secs();
    tracing::debug!(
        vehicle = vehicle.id(),
        hops = steps.len().saturating_sub(1),
        planning_time,
        "route planned"
    );

    Ok(RoutePlan {
        vehicle_id: vehicle.id(),
        start: source,
        goal: destination,
        steps,
        charge_stops,
        total_cost,
        planning_time,
    })
}

/// Follow parent pointers from the goal back to the start, returning the
/// path in start-to-goal order. `None` when the pointer chain is broken.
fn reconstruct_path(
    parent: &[Option<NodeId>],
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = parent[current]?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
