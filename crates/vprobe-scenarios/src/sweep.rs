//! The scenario sweep: strictly sequential before/after runs over a list of
//! transaction sizes.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vprobe_core::{ScenarioResult, VprobeError, VprobeResult};
use vprobe_engine::Engine;

use crate::transaction::{run_transaction, TransactionSettings};

/// Configuration for one scenario sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Transaction sizes to sweep, in execution order
    #[serde(default = "default_kwh_values")]
    pub kwh_values: Vec<f64>,
    /// Cooperative pacing delay between scenarios in milliseconds; gives an
    /// external engine process time to settle, not needed for correctness
    #[serde(default)]
    pub pace_ms: u64,
    #[serde(default)]
    pub settings: TransactionSettings,
}

fn default_kwh_values() -> Vec<f64> {
    vec![1.0, 3.0, 11.0]
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            kwh_values: default_kwh_values(),
            pace_ms: 0,
            settings: TransactionSettings::default(),
        }
    }
}

/// Load a sweep configuration from a YAML file.
pub fn load_sweep_config(path: &Path) -> Result<SweepConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading sweep config {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("parsing sweep config {}", path.display()))
}

/// One scenario that failed mid-sweep and was excluded from the results.
#[derive(Debug, Clone, Serialize)]
pub struct SweepFailure {
    pub kwh: f64,
    pub error: String,
}

/// Outcome of a sweep: complete results in execution order plus a record of
/// every scenario that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub results: Vec<ScenarioResult>,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn success_count(&self) -> usize {
        self.results.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Run every scenario of the sweep, one at a time, against a single engine
/// handle.
///
/// A failed scenario is recorded and skipped; the sweep continues with the
/// remaining parameters. Fatal errors (engine unreachable, model gone) abort
/// the sweep, and so does malformed telemetry: an odd-length voltage array is
/// a defect in the adapter's data, not a per-scenario condition, and every
/// later capture would hit it again. There is no automatic retry: a failed
/// scenario may have left the model mutated, and re-running it is the
/// caller's decision after a model reload.
pub fn run_sweep(engine: &mut dyn Engine, config: &SweepConfig) -> VprobeResult<SweepReport> {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for (index, &kwh) in config.kwh_values.iter().enumerate() {
        if index > 0 && config.pace_ms > 0 {
            thread::sleep(Duration::from_millis(config.pace_ms));
        }

        match run_transaction(engine, kwh, &config.settings) {
            Ok(result) => results.push(result),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e @ VprobeError::MalformedTelemetry(_)) => return Err(e),
            Err(e) => {
                warn!("Scenario {} kWh failed, skipping: {}", kwh, e);
                failures.push(SweepFailure {
                    kwh,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Sweep finished: {} succeeded, {} failed",
        results.len(),
        failures.len()
    );
    Ok(SweepReport { results, failures })
}
