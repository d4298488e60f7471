//! EV fleet route planning library.
//!
//! This crate plans time-optimal routes for electric vehicles over a shared
//! road network, accounting for limited battery capacity, en-route
//! recharging, and conflicts over charging slots. The core is a Space-Time A*
//! search per vehicle, guided by an exact travel-time heuristic and a shared
//! ledger of charging windows committed by earlier-planned vehicles.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behaviour.

#![deny(warnings)]

pub mod error;
pub mod fleet;
pub mod grid;
pub mod heuristic;
pub mod ledger;
pub mod output;
pub mod planner;
pub mod vehicle;

pub use error::{Error, Result};
pub use fleet::{plan_fleet, plan_fleet_with_ledger, FleetReport, VehicleOutcome};
pub use grid::{load_grid, NodeId, RoadGrid};
pub use heuristic::true_heuristic;
pub use ledger::{ChargeLedger, ChargeWindow};
pub use planner::{plan_route, ChargeStop, RoutePlan};
pub use vehicle::{ChargeNeed, SearchClock, Vehicle, VehicleConfig};
