//! Electric vehicle state and battery model.
//!
//! A [`Vehicle`] carries the battery and kinematic parameters for one agent
//! and is mutated in place by exactly one planning call. Travel time is
//! computed as `distance / discharge_rate`; the discharge rate thus doubles
//! as a time calibration, conflating energy consumption with time. Every cost
//! comparison downstream depends on this calibration being applied uniformly,
//! so it must not be "fixed" in isolation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::NodeId;

static NEXT_VEHICLE_ID: AtomicU32 = AtomicU32::new(0);

/// Charging requirement for a single edge, given the current battery level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeNeed {
    /// The battery already holds enough charge for the edge.
    None,
    /// Charging for this many time units tops the battery up just enough.
    Charge(f64),
    /// The edge needs more charge than the battery can ever hold.
    Infeasible,
}

impl ChargeNeed {
    /// Charging duration, treating `None` as zero. Must not be called on
    /// `Infeasible` (there is no finite duration to return).
    pub fn duration(self) -> f64 {
        match self {
            ChargeNeed::None => 0.0,
            ChargeNeed::Charge(time) => time,
            ChargeNeed::Infeasible => {
                debug_assert!(false, "infeasible edges have no charge duration");
                f64::INFINITY
            }
        }
    }
}

/// Construction parameters for a [`Vehicle`], with the documented defaults.
#[derive(Debug, Clone, Copy)]
pub struct VehicleConfig {
    pub source: NodeId,
    pub destination: NodeId,
    /// Initial battery level.
    pub battery: f64,
    /// Charging rate at a station, energy per unit time.
    pub charge_rate: f64,
    /// Discharge rate while travelling, distance per unit charge.
    pub discharge_rate: f64,
    /// Maximum battery capacity.
    pub capacity: f64,
    /// Average travelling speed, distance per unit time.
    pub speed: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            source: 0,
            destination: 7,
            battery: 10.0,
            charge_rate: 1.0,
            discharge_rate: 0.5,
            capacity: 50.0,
            speed: 0.7,
        }
    }
}

/// One electric vehicle agent. Identifiers are assigned monotonically
/// process-wide at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    id: u32,
    source: NodeId,
    destination: NodeId,
    battery: f64,
    charge_rate: f64,
    discharge_rate: f64,
    capacity: f64,
    speed: f64,
}

impl Vehicle {
    /// Build a vehicle after validating its parameters.
    pub fn new(config: VehicleConfig) -> Result<Self> {
        if !config.discharge_rate.is_finite() || config.discharge_rate <= 0.0 {
            return Err(Error::VehicleValidation {
                message: format!(
                    "discharge_rate must be positive, got {}",
                    config.discharge_rate
                ),
            });
        }
        if !config.speed.is_finite() || config.speed <= 0.0 {
            return Err(Error::VehicleValidation {
                message: format!("speed must be positive, got {}", config.speed),
            });
        }
        if !config.charge_rate.is_finite() || config.charge_rate <= 0.0 {
            return Err(Error::VehicleValidation {
                message: format!("charge_rate must be positive, got {}", config.charge_rate),
            });
        }
        if !config.capacity.is_finite() || config.capacity < 0.0 {
            return Err(Error::VehicleValidation {
                message: format!("capacity must be non-negative, got {}", config.capacity),
            });
        }
        if !config.battery.is_finite() || config.battery < 0.0 || config.battery > config.capacity
        {
            return Err(Error::VehicleValidation {
                message: format!(
                    "battery must lie in [0, {}], got {}",
                    config.capacity, config.battery
                ),
            });
        }

        Ok(Self {
            id: NEXT_VEHICLE_ID.fetch_add(1, Ordering::Relaxed),
            source: config.source,
            destination: config.destination,
            battery: config.battery,
            charge_rate: config.charge_rate,
            discharge_rate: config.discharge_rate,
            capacity: config.capacity,
            speed: config.speed,
        })
    }

    /// Build a vehicle with default battery parameters and the given endpoints.
    pub fn between(source: NodeId, destination: NodeId) -> Result<Self> {
        Self::new(VehicleConfig {
            source,
            destination,
            ..VehicleConfig::default()
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// Current battery level; always within `[0, capacity]`.
    pub fn battery(&self) -> f64 {
        self.battery
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Time to traverse an edge of the given length.
    pub fn travel_time(&self, distance: f64) -> f64 {
        distance / self.discharge_rate
    }

    /// Charging requirement before traversing an edge of the given length.
    pub fn charge_need(&self, distance: f64) -> ChargeNeed {
        let required = distance / self.discharge_rate;
        if required > self.capacity {
            ChargeNeed::Infeasible
        } else if required > self.battery {
            ChargeNeed::Charge((required - self.battery) / self.charge_rate)
        } else {
            ChargeNeed::None
        }
    }

    /// Consume battery for an edge that is about to be committed.
    ///
    /// Without charging the consumed charge is subtracted; with charging the
    /// battery is reset to zero, modelling a vehicle that tops up exactly
    /// enough and departs with no margin left for the next edge. Infeasible
    /// edges must never reach this method.
    pub fn apply_edge(&mut self, distance: f64) {
        match self.charge_need(distance) {
            ChargeNeed::None => self.battery -= distance / self.discharge_rate,
            ChargeNeed::Charge(_) => self.battery = 0.0,
            ChargeNeed::Infeasible => {
                debug_assert!(false, "apply_edge called on an infeasible edge");
            }
        }
    }
}

/// Wall-clock reference captured at the start of one planning call.
///
/// Elapsed readings serve two purposes: the reported per-vehicle planning
/// time, and the timestamps stamped onto charging windows recorded in the
/// ledger. The latter means charge windows are wall-clock-derived rather than
/// simulation-time-derived; this coupling is inherited behaviour and is kept.
#[derive(Debug, Clone, Copy)]
pub struct SearchClock {
    started: Instant,
}

impl SearchClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock started.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
