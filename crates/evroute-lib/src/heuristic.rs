//! True-distance heuristic for the space-time search.
//!
//! Runs a label-setting shortest-path pass seeded at the destination over the
//! time-weighted grid, producing the exact minimal travel time from every
//! node to the destination, ignoring charging delays and other vehicles'
//! reservations. Exactness makes the heuristic both admissible and
//! consistent for the main search. Travel times are vehicle-specific, so the
//! table is recomputed per vehicle.

use crate::grid::{NodeId, RoadGrid};
use crate::vehicle::Vehicle;

/// Exact remaining travel time from every node to `destination`, or `None`
/// where the destination is unreachable. Pure function of its inputs.
pub fn true_heuristic(grid: &RoadGrid, vehicle: &Vehicle, destination: NodeId) -> Vec<Option<f64>> {
    let nodes = grid.node_count();
    let mut dist: Vec<Option<f64>> = vec![None; nodes];
    let mut settled = vec![false; nodes];

    dist[destination] = Some(0.0);

    for _ in 0..nodes {
        let Some(u) = select_min(&dist, &settled) else {
            break;
        };
        settled[u] = true;

        let Some(dist_u) = dist[u] else { continue };
        for (v, distance) in grid.neighbours(u) {
            if settled[v] {
                continue;
            }
            let candidate = dist_u + vehicle.travel_time(distance);
            if dist[v].is_none_or(|current| candidate < current) {
                dist[v] = Some(candidate);
            }
        }
    }

    dist
}

/// Lowest-index node among the unsettled nodes with minimal finite tentative
/// distance; `None` once the reachable frontier is exhausted.
pub(crate) fn select_min(dist: &[Option<f64>], settled: &[bool]) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for (node, tentative) in dist.iter().enumerate() {
        if settled[node] {
            continue;
        }
        let Some(tentative) = *tentative else {
            continue;
        };
        if best.is_none_or(|(_, cost)| tentative < cost) {
            best = Some((node, tentative));
        }
    }
    best.map(|(node, _)| node)
}
