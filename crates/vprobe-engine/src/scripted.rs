//! In-memory engine stand-in with canned telemetry.
//!
//! [`ScriptedEngine`] implements [`Engine`](crate::Engine) over fixture data
//! instead of a live session: each bus carries one voltage profile for the
//! regulator-off state and one for the regulator-on state, loads are a name →
//! kW table, and every operation is appended to a command log so tests can
//! assert on effect ordering. A `fail_on` hook makes any single step fail to
//! exercise scenario-level error handling.

use std::collections::HashMap;

use vprobe_core::{Kilovolts, VprobeError, VprobeResult};

use crate::Engine;

/// Fixture telemetry for one bus.
#[derive(Debug, Clone)]
pub struct ScriptedBus {
    pub name: String,
    pub base_kv: f64,
    /// Interleaved mag/angle reported while no regulating device is enabled
    pub unregulated: Vec<f64>,
    /// Interleaved mag/angle reported while a regulating device is enabled
    pub regulated: Vec<f64>,
}

impl ScriptedBus {
    /// A bus whose voltages do not depend on regulator state.
    pub fn flat(name: &str, base_kv: f64, mag_angle: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            base_kv,
            unregulated: mag_angle.to_vec(),
            regulated: mag_angle.to_vec(),
        }
    }

    /// A bus with distinct regulator-off / regulator-on profiles.
    pub fn regulated(name: &str, base_kv: f64, unregulated: &[f64], regulated: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            base_kv,
            unregulated: unregulated.to_vec(),
            regulated: regulated.to_vec(),
        }
    }
}

/// Scripted [`Engine`](crate::Engine) implementation for tests and offline runs.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    buses: Vec<ScriptedBus>,
    loads: HashMap<String, f64>,
    taps: HashMap<String, i32>,
    regulating: bool,
    fail_on: Option<String>,
    fail_fatally: bool,
    /// Every operation applied to the engine, in order
    pub command_log: Vec<String>,
    /// Number of solves triggered so far
    pub solve_count: usize,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bus(&mut self, bus: ScriptedBus) {
        self.buses.push(bus);
    }

    /// Register a load with its current kW rating.
    pub fn with_load(mut self, name: &str, kw: f64) -> Self {
        self.loads.insert(name.to_string(), kw);
        self
    }

    /// Register a regulating device's final tap position.
    pub fn with_tap(mut self, regulator: &str, position: i32) -> Self {
        self.taps.insert(regulator.to_string(), position);
        self
    }

    /// Make every operation whose log entry contains `needle` fail with an
    /// engine-level error.
    pub fn fail_on(&mut self, needle: &str) {
        self.fail_on = Some(needle.to_string());
        self.fail_fatally = false;
    }

    /// Like [`ScriptedEngine::fail_on`], but the failure reports the engine
    /// session as gone (e.g. the bridge process died mid-run).
    pub fn fail_fatally_on(&mut self, needle: &str) {
        self.fail_on = Some(needle.to_string());
        self.fail_fatally = true;
    }

    /// Current kW rating of a load, if registered.
    pub fn load_kw(&self, name: &str) -> Option<f64> {
        self.loads.get(name).copied()
    }

    fn record(&mut self, entry: String) -> VprobeResult<()> {
        if let Some(needle) = &self.fail_on {
            if entry.contains(needle.as_str()) {
                let message = format!("scripted failure on '{entry}'");
                return Err(if self.fail_fatally {
                    VprobeError::EngineUnavailable(message)
                } else {
                    VprobeError::Engine(message)
                });
            }
        }
        self.command_log.push(entry);
        Ok(())
    }

    fn find_bus(&self, name: &str) -> VprobeResult<&ScriptedBus> {
        self.buses
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| VprobeError::Engine(format!("bus '{name}' not found")))
    }
}

impl Engine for ScriptedEngine {
    fn command(&mut self, cmd: &str) -> VprobeResult<()> {
        self.record(format!("command {cmd}"))
    }

    fn bus_names(&mut self) -> VprobeResult<Vec<String>> {
        Ok(self.buses.iter().map(|b| b.name.clone()).collect())
    }

    fn bus_voltages(&mut self, bus: &str) -> VprobeResult<Vec<f64>> {
        self.record(format!("voltages {bus}"))?;
        let regulating = self.regulating;
        let bus = self.find_bus(bus)?;
        Ok(if regulating {
            bus.regulated.clone()
        } else {
            bus.unregulated.clone()
        })
    }

    fn bus_base_kv(&mut self, bus: &str) -> VprobeResult<Kilovolts> {
        self.record(format!("basekv {bus}"))?;
        Ok(Kilovolts(self.find_bus(bus)?.base_kv))
    }

    fn scale_load(&mut self, load: &str, factor: f64) -> VprobeResult<()> {
        self.record(format!("scaleload {load} {factor}"))?;
        match self.loads.get_mut(load) {
            Some(kw) => {
                *kw *= factor;
                Ok(())
            }
            None => Err(VprobeError::Engine(format!("load '{load}' not found"))),
        }
    }

    fn regulator_tap(&mut self, regulator: &str) -> VprobeResult<i32> {
        self.record(format!("tap {regulator}"))?;
        self.taps
            .get(regulator)
            .copied()
            .ok_or_else(|| VprobeError::Engine(format!("regulator '{regulator}' not found")))
    }

    fn solve(&mut self) -> VprobeResult<()> {
        self.record("solve".to_string())?;
        self.solve_count += 1;
        Ok(())
    }

    fn set_device_enabled(&mut self, device: &str, enabled: bool) -> VprobeResult<()> {
        self.record(format!("enable {device} {enabled}"))?;
        self.regulating = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_engine() -> ScriptedEngine {
        let mut engine = ScriptedEngine::new()
            .with_load("house1", 1.0)
            .with_tap("Reg1", 5);
        engine.push_bus(ScriptedBus::regulated(
            "h1bus",
            7.2,
            &[6800.0, 0.0],
            &[7200.0, 0.0],
        ));
        engine
    }

    #[test]
    fn voltage_profile_follows_regulator_state() {
        let mut engine = demo_engine();
        assert_eq!(engine.bus_voltages("h1bus").unwrap(), vec![6800.0, 0.0]);

        engine.set_device_enabled("RegControl.Reg1", true).unwrap();
        assert_eq!(engine.bus_voltages("h1bus").unwrap(), vec![7200.0, 0.0]);
    }

    #[test]
    fn load_scaling_multiplies_rating() {
        let mut engine = demo_engine();
        engine.scale_load("house1", 3.5).unwrap();
        assert_eq!(engine.load_kw("house1"), Some(3.5));

        let err = engine.scale_load("house9", 2.0).unwrap_err();
        assert!(matches!(err, VprobeError::Engine(_)));
    }

    #[test]
    fn fail_on_hits_matching_operation_only() {
        let mut engine = demo_engine();
        engine.fail_on("voltages h1bus");

        assert!(engine.solve().is_ok());
        assert!(engine.bus_voltages("h1bus").is_err());
    }

    #[test]
    fn fatal_failure_reports_session_gone() {
        let mut engine = demo_engine();
        engine.fail_fatally_on("solve");

        let err = engine.solve().unwrap_err();
        assert!(matches!(err, VprobeError::EngineUnavailable(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn command_log_preserves_effect_order() {
        let mut engine = demo_engine();
        engine.set_device_enabled("RegControl.Reg1", false).unwrap();
        engine.solve().unwrap();
        engine.regulator_tap("Reg1").unwrap();

        assert_eq!(
            engine.command_log,
            vec![
                "enable RegControl.Reg1 false".to_string(),
                "solve".to_string(),
                "tap Reg1".to_string(),
            ]
        );
    }
}
