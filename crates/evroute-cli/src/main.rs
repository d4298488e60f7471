use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evroute_lib::{
    load_grid, output, plan_fleet, plan_route, ChargeLedger, RoadGrid, Vehicle, VehicleConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "EV fleet space-time route planner")]
struct Cli {
    /// Path to the adjacency matrix file (whitespace-separated square matrix).
    #[arg(long)]
    matrix: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route for a single vehicle.
    Route {
        /// Source node.
        #[arg(long)]
        from: usize,
        /// Destination node.
        #[arg(long, default_value_t = 7)]
        to: usize,
        #[command(flatten)]
        battery: BatteryOpts,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Plan a whole fleet sequentially, sharing one charging ledger.
    Fleet {
        /// Vehicle endpoints as FROM:TO; may be repeated. Defaults to the
        /// demo fleet 8:4 0:3 7:5 2:4.
        #[arg(long = "vehicle")]
        vehicles: Vec<String>,
        #[command(flatten)]
        battery: BatteryOpts,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

/// Battery and kinematic parameters shared by every constructed vehicle.
#[derive(Args, Debug, Clone, Copy)]
struct BatteryOpts {
    /// Initial battery level.
    #[arg(long, default_value_t = 10.0)]
    battery: f64,
    /// Charging rate at a station (energy per unit time).
    #[arg(long, default_value_t = 1.0)]
    charge_rate: f64,
    /// Discharge rate while travelling (distance per unit charge).
    #[arg(long, default_value_t = 0.5)]
    discharge_rate: f64,
    /// Maximum battery capacity.
    #[arg(long, default_value_t = 50.0)]
    capacity: f64,
    /// Average travelling speed.
    #[arg(long, default_value_t = 0.7)]
    speed: f64,
}

impl BatteryOpts {
    fn config(&self, source: usize, destination: usize) -> VehicleConfig {
        VehicleConfig {
            source,
            destination,
            battery: self.battery,
            charge_rate: self.charge_rate,
            discharge_rate: self.discharge_rate,
            capacity: self.capacity,
            speed: self.speed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Format::Text => "text",
            Format::Json => "json",
        };
        f.write_str(value)
    }
}

/// Demo fleet matching the default configuration of the reference runs.
const DEMO_FLEET: [(usize, usize); 4] = [(8, 4), (0, 3), (7, 5), (2, 4)];

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let grid = load_grid(&cli.matrix)
        .with_context(|| format!("failed to load adjacency matrix from {}", cli.matrix.display()))?;

    match cli.command {
        Command::Route {
            from,
            to,
            battery,
            format,
        } => handle_route(&grid, from, to, &battery, format),
        Command::Fleet {
            vehicles,
            battery,
            format,
        } => handle_fleet(&grid, &vehicles, &battery, format),
    }
}

fn handle_route(
    grid: &RoadGrid,
    from: usize,
    to: usize,
    battery: &BatteryOpts,
    format: Format,
) -> Result<()> {
    let mut vehicle = Vehicle::new(battery.config(from, to)).context("invalid vehicle")?;
    let mut ledger = ChargeLedger::new();
    let plan = plan_route(grid, &mut vehicle, &mut ledger)
        .with_context(|| format!("failed to plan route {from} -> {to}"))?;

    match format {
        Format::Text => print!("{}", output::render_route(&plan)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }
    Ok(())
}

fn handle_fleet(
    grid: &RoadGrid,
    specs: &[String],
    battery: &BatteryOpts,
    format: Format,
) -> Result<()> {
    let endpoints = if specs.is_empty() {
        DEMO_FLEET.to_vec()
    } else {
        specs
            .iter()
            .map(|spec| parse_vehicle_spec(spec))
            .collect::<Result<Vec<_>>>()?
    };

    let mut vehicles = Vec::with_capacity(endpoints.len());
    for (from, to) in endpoints {
        let vehicle = Vehicle::new(battery.config(from, to))
            .with_context(|| format!("invalid vehicle {from}:{to}"))?;
        vehicles.push(vehicle);
    }

    let report = plan_fleet(grid, vehicles);
    match format {
        Format::Text => print!("{}", output::render_fleet(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Parse a FROM:TO vehicle endpoint pair.
fn parse_vehicle_spec(spec: &str) -> Result<(usize, usize)> {
    let Some((from, to)) = spec.split_once(':') else {
        bail!("vehicle spec '{spec}' must have the form FROM:TO");
    };
    let from = from
        .trim()
        .parse()
        .with_context(|| format!("invalid source node in vehicle spec '{spec}'"))?;
    let to = to
        .trim()
        .parse()
        .with_context(|| format!("invalid destination node in vehicle spec '{spec}'"))?;
    Ok((from, to))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_spec_parses_endpoints() {
        assert_eq!(parse_vehicle_spec("8:4").unwrap(), (8, 4));
        assert_eq!(parse_vehicle_spec(" 0 : 3 ").unwrap(), (0, 3));
    }

    #[test]
    fn vehicle_spec_rejects_malformed_input() {
        assert!(parse_vehicle_spec("8").is_err());
        assert!(parse_vehicle_spec("a:b").is_err());
    }
}
