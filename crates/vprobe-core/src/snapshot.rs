//! Scenario snapshots and before/after comparison results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::PhaseReading;

/// The complete set of classified phase readings across all buses at one
/// solved instant.
///
/// Readings are in engine bus-iteration order and the snapshot is immutable
/// once captured; a new solve invalidates it and requires a fresh capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub captured_at: DateTime<Utc>,
    pub readings: Vec<PhaseReading>,
}

impl ScenarioSnapshot {
    pub fn new(readings: Vec<PhaseReading>) -> Self {
        Self {
            captured_at: Utc::now(),
            readings,
        }
    }

    /// Number of readings outside the voltage band.
    pub fn violation_count(&self) -> usize {
        self.readings
            .iter()
            .filter(|r| r.status.is_violation())
            .count()
    }
}

/// One full before/after comparison for a single scenario parameter.
///
/// Owned by the scenario runner for one invocation and handed by value to
/// reporting consumers; either both snapshots were fully captured or the
/// scenario failed and no result exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario parameter: transaction size in kWh
    pub kwh: f64,
    /// Whether the heavy-demand load scaling was applied
    pub load_scaled: bool,
    /// Snapshot with the regulating device disabled
    pub before: ScenarioSnapshot,
    /// Snapshot with the regulating device re-enabled
    pub after: ScenarioSnapshot,
    /// Final tap position of the regulating device, read after the second solve
    pub tap_position: i32,
}
