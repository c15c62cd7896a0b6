//! The fault scenario: conditional fault injection with a backup-supply
//! classification for alerting.
//!
//! Unlike the transaction scenario there is no before/after toggle; the
//! decision to inject is itself the scenario parameter. The decision is an
//! explicit [`FaultDecision`] argument rather than anything interactive, so
//! the runner is testable without a TTY - prompting (if any) is the entry
//! point's business.

use serde::{Deserialize, Serialize};
use tracing::info;

use vprobe_core::{ScenarioSnapshot, VprobeResult};
use vprobe_engine::{Engine, FaultSpec};

use crate::transaction::capture_snapshot;

/// Configuration of one fault scenario.
///
/// The backup candidates are supplied by configuration, not derived from live
/// circuit topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultScenario {
    /// Engine device name for the injected fault
    #[serde(default = "default_fault_name")]
    pub fault_name: String,
    /// Bus the fault is connected to
    #[serde(default = "default_fault_bus")]
    pub bus: String,
    #[serde(default = "default_phases")]
    pub phases: u32,
    #[serde(default = "default_resistance")]
    pub resistance_ohms: f64,
    /// Entity named in the alert, e.g. the affected house
    #[serde(default = "default_entity")]
    pub affected_entity: String,
    /// Configured backup-supply candidates, in preference order
    #[serde(default)]
    pub backup_candidates: Vec<String>,
}

fn default_fault_name() -> String {
    "f1".to_string()
}

fn default_fault_bus() -> String {
    "H1bus".to_string()
}

fn default_phases() -> u32 {
    1
}

fn default_resistance() -> f64 {
    0.0001
}

fn default_entity() -> String {
    "House1".to_string()
}

impl Default for FaultScenario {
    fn default() -> Self {
        Self {
            fault_name: default_fault_name(),
            bus: default_fault_bus(),
            phases: default_phases(),
            resistance_ohms: default_resistance(),
            affected_entity: default_entity(),
            backup_candidates: Vec::new(),
        }
    }
}

impl FaultScenario {
    fn fault_spec(&self) -> FaultSpec {
        FaultSpec {
            name: self.fault_name.clone(),
            bus: self.bus.clone(),
            phases: self.phases,
            resistance_ohms: self.resistance_ohms,
        }
    }

    /// Build the alert payload for an injected fault.
    pub fn build_alert(&self) -> FaultAlert {
        let backups = if self.backup_candidates.is_empty() {
            "none configured".to_string()
        } else {
            self.backup_candidates.join(", ")
        };
        let human_message = format!(
            "Fault detected at {}! Checking available backup options... {} can be supplied by: {}",
            self.affected_entity, self.affected_entity, backups
        );
        FaultAlert {
            fault_detected: true,
            affected_entity: self.affected_entity.clone(),
            backup_candidates: self.backup_candidates.clone(),
            human_message,
        }
    }
}

/// Whether to inject the fault. Supplied by the caller (flag or prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDecision {
    Apply,
    Decline,
}

/// Classification outcome delivered to the alert dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultAlert {
    pub fault_detected: bool,
    pub affected_entity: String,
    pub backup_candidates: Vec<String>,
    pub human_message: String,
}

/// Outcome of one fault-scenario invocation.
#[derive(Debug, Clone)]
pub enum FaultOutcome {
    /// Fault declined; the model was not touched
    NoFault,
    /// Fault injected and solved; alert ready for dispatch
    Fault {
        alert: FaultAlert,
        /// Post-fault voltage snapshot across all buses
        snapshot: ScenarioSnapshot,
    },
}

/// Run the fault scenario.
///
/// Declining performs no engine interaction at all. Applying injects the
/// fault and solves; the injection is irreversible for the lifetime of the
/// loaded model, so a failure after this point still leaves the model faulted.
pub fn run_fault(
    engine: &mut dyn Engine,
    scenario: &FaultScenario,
    decision: FaultDecision,
) -> VprobeResult<FaultOutcome> {
    match decision {
        FaultDecision::Decline => {
            info!("No fault applied. System running normally.");
            Ok(FaultOutcome::NoFault)
        }
        FaultDecision::Apply => {
            info!("Applying fault at {}", scenario.bus);
            engine.inject_fault(&scenario.fault_spec())?;
            engine.solve()?;
            let snapshot = capture_snapshot(engine)?;
            Ok(FaultOutcome::Fault {
                alert: scenario.build_alert(),
                snapshot,
            })
        }
    }
}
