//! # vprobe-engine: Circuit Engine Adapter
//!
//! The seam between the analysis pipeline and the external circuit-solving
//! engine. The engine is a black box driven by text commands with a read-only
//! telemetry surface; [`Engine`] captures exactly the surface the pipeline
//! needs and nothing more:
//!
//! - command issuance (model load, device toggle, load scaling, fault
//!   injection, solve)
//! - telemetry reads (bus list, per-bus interleaved magnitude/angle array,
//!   per-bus base voltage, regulator tap position)
//!
//! Two implementations ship with the crate: [`TcpEngine`], a line-oriented
//! client for a live engine bridge, and [`ScriptedEngine`], an in-memory
//! stand-in with canned telemetry used by scenario and CLI tests.
//!
//! The engine's active-bus/active-device selection is session state, so the
//! trait takes `&mut self` throughout and a handle must never be shared across
//! logical threads. Every runner borrows the adapter explicitly for the
//! duration of one run; dropping it releases the underlying session.

pub mod protocol;
pub mod scripted;
pub mod tcp;

pub use protocol::FaultSpec;
pub use scripted::{ScriptedBus, ScriptedEngine};
pub use tcp::TcpEngine;

use vprobe_core::{Kilovolts, VprobeError, VprobeResult};

/// Command and telemetry surface of the external circuit engine.
///
/// All calls are blocking and fallible; a rejected command or failed read
/// surfaces as [`VprobeError::Engine`]. Operations with an engine-text
/// equivalent are provided in terms of [`Engine::command`]; implementations
/// that do not speak the text protocol (e.g. the scripted test engine)
/// override them.
pub trait Engine {
    /// Issue a raw text command to the engine.
    fn command(&mut self, cmd: &str) -> VprobeResult<()>;

    /// Names of all buses in the active circuit, in engine iteration order.
    fn bus_names(&mut self) -> VprobeResult<Vec<String>>;

    /// Interleaved magnitude (V) / angle (deg) pairs for one bus.
    ///
    /// Activates the bus engine-side; only valid after a solve.
    fn bus_voltages(&mut self, bus: &str) -> VprobeResult<Vec<f64>>;

    /// Nominal base voltage of one bus. Zero or negative means the engine
    /// could not attribute a base.
    fn bus_base_kv(&mut self, bus: &str) -> VprobeResult<Kilovolts>;

    /// Multiply a named load's real-power rating by `factor`.
    fn scale_load(&mut self, load: &str, factor: f64) -> VprobeResult<()>;

    /// Tap position of a named regulating device, read after a solve.
    fn regulator_tap(&mut self, regulator: &str) -> VprobeResult<i32>;

    /// Trigger a load-flow solve of the active circuit.
    fn solve(&mut self) -> VprobeResult<()> {
        self.command(&protocol::solve())
    }

    /// Enable or disable a named device such as a RegControl.
    fn set_device_enabled(&mut self, device: &str, enabled: bool) -> VprobeResult<()> {
        self.command(&protocol::set_enabled(device, enabled))
    }

    /// Inject a shunt fault into the active circuit. Irreversible for the
    /// lifetime of the loaded model; reload the model to clear it.
    fn inject_fault(&mut self, fault: &FaultSpec) -> VprobeResult<()> {
        self.command(&fault.to_command())
    }
}

/// Load a circuit model and verify the engine actually built a circuit.
///
/// A model that compiles to zero buses is as fatal as one that fails to
/// compile; both surface as [`VprobeError::ModelLoad`].
pub fn load_model(engine: &mut dyn Engine, path: &str) -> VprobeResult<Vec<String>> {
    engine
        .command(&protocol::redirect(path))
        .map_err(|e| VprobeError::ModelLoad(format!("loading '{path}': {e}")))?;

    let buses = engine.bus_names()?;
    if buses.is_empty() {
        return Err(VprobeError::ModelLoad(format!(
            "model '{path}' loaded but the engine reports zero buses"
        )));
    }
    tracing::info!("Model '{}' loaded with {} buses", path, buses.len());
    Ok(buses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_model_rejects_empty_circuit() {
        let mut engine = ScriptedEngine::new();
        let err = load_model(&mut engine, "empty.dss").unwrap_err();
        assert!(matches!(err, VprobeError::ModelLoad(_)));
    }

    #[test]
    fn load_model_returns_bus_order() {
        let mut engine = ScriptedEngine::new();
        engine.push_bus(ScriptedBus::flat("sourcebus", 7.2, &[7200.0, 0.0]));
        engine.push_bus(ScriptedBus::flat("h1bus", 7.2, &[7150.0, -120.0]));

        let buses = load_model(&mut engine, "feeder.dss").unwrap();
        assert_eq!(buses, vec!["sourcebus".to_string(), "h1bus".to_string()]);
    }
}
