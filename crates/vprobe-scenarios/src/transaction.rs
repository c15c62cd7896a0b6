//! The transaction scenario: a before/after regulator comparison for one
//! transaction size.
//!
//! **Effect sequence** (each a blocking engine call, in order):
//! 1. Scale the named load iff the transaction exceeds the heavy-demand
//!    threshold.
//! 2. Disable the regulating device, solve, capture the "before" snapshot.
//! 3. Re-enable the device, solve, capture the "after" snapshot.
//! 4. Read the device's final tap position.
//!
//! Any step failing abandons the scenario: a [`ScenarioResult`] is either
//! complete (both snapshots plus tap) or does not exist. There is no rollback
//! of the load scaling; a failed scenario leaves the external model mutated
//! and the caller must reload it before retrying.

use serde::{Deserialize, Serialize};
use tracing::info;

use vprobe_core::{analyze, ScenarioResult, ScenarioSnapshot, VprobeResult};
use vprobe_engine::Engine;

/// Knobs of the transaction scenario, with the conventional defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSettings {
    /// Transactions above this size count as heavy demand and scale the load
    #[serde(default = "default_heavy_threshold")]
    pub heavy_threshold_kwh: f64,
    /// Load whose kW rating is scaled for heavy demand
    #[serde(default = "default_load")]
    pub load: String,
    /// Multiplier applied to the load's kW rating
    #[serde(default = "default_load_factor")]
    pub load_factor: f64,
    /// Regulating device toggled between the two solves
    #[serde(default = "default_regulator")]
    pub regulator: String,
}

fn default_heavy_threshold() -> f64 {
    10.0
}

fn default_load() -> String {
    "house1".to_string()
}

fn default_load_factor() -> f64 {
    3.5
}

fn default_regulator() -> String {
    "RegControl.Reg1".to_string()
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            heavy_threshold_kwh: default_heavy_threshold(),
            load: default_load(),
            load_factor: default_load_factor(),
            regulator: default_regulator(),
        }
    }
}

impl TransactionSettings {
    /// Bare device name used for tap telemetry ("RegControl.Reg1" -> "Reg1").
    pub fn tap_name(&self) -> &str {
        self.regulator
            .rsplit('.')
            .next()
            .unwrap_or(&self.regulator)
    }
}

/// Capture classified readings for every bus in engine iteration order.
///
/// Per-bus reads are sequential by design: the engine's active-bus selection
/// is session state, so there is nothing to parallelize here.
pub fn capture_snapshot(engine: &mut dyn Engine) -> VprobeResult<ScenarioSnapshot> {
    let mut readings = Vec::new();
    for bus in engine.bus_names()? {
        let telemetry = engine.bus_voltages(&bus)?;
        let base = engine.bus_base_kv(&bus)?;
        readings.extend(analyze(&bus, &telemetry, base)?);
    }
    Ok(ScenarioSnapshot::new(readings))
}

/// Run one full before/after comparison for a single transaction size.
pub fn run_transaction(
    engine: &mut dyn Engine,
    kwh: f64,
    settings: &TransactionSettings,
) -> VprobeResult<ScenarioResult> {
    info!("Simulating transaction of {} kWh", kwh);

    let load_scaled = kwh > settings.heavy_threshold_kwh;
    if load_scaled {
        info!(
            "High demand detected, scaling load '{}' by {}",
            settings.load, settings.load_factor
        );
        engine.scale_load(&settings.load, settings.load_factor)?;
    } else {
        info!("Normal transaction, no extra load applied");
    }

    engine.set_device_enabled(&settings.regulator, false)?;
    engine.solve()?;
    let before = capture_snapshot(engine)?;

    engine.set_device_enabled(&settings.regulator, true)?;
    engine.solve()?;
    let after = capture_snapshot(engine)?;

    let tap_position = engine.regulator_tap(settings.tap_name())?;
    info!("Tap changer final position: {}", tap_position);

    Ok(ScenarioResult {
        kwh,
        load_scaled,
        before,
        after,
        tap_position,
    })
}
