//! # vprobe-scenarios: Scenario Runners
//!
//! Drives named scenarios through the engine adapter and hands the paired
//! results to reporting and alerting consumers:
//!
//! - [`transaction`] - one before/after regulator comparison for a
//!   transaction size, including the shared all-bus snapshot capture
//! - [`sweep`] - strictly sequential orchestration over a list of transaction
//!   sizes, skipping failed scenarios
//! - [`fault`] - conditional fault injection with a backup-supply
//!   classification
//! - [`alert`] - webhook delivery of a fault classification
//!
//! Everything here is single-threaded and blocking: one engine handle, one
//! caller, no overlap between solves.

pub mod alert;
pub mod fault;
pub mod sweep;
pub mod transaction;

pub use alert::post_alert;
pub use fault::{run_fault, FaultAlert, FaultDecision, FaultOutcome, FaultScenario};
pub use sweep::{load_sweep_config, run_sweep, SweepConfig, SweepFailure, SweepReport};
pub use transaction::{capture_snapshot, run_transaction, TransactionSettings};
