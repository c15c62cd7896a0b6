//! # vprobe-core: Voltage Analysis Core
//!
//! Data model and analysis pipeline for scenario-based voltage studies of a
//! distribution circuit solved by an external engine.
//!
//! The one piece of real business logic lives in [`analyzer::analyze`]: decode
//! a bus's flat interleaved magnitude/angle telemetry into per-phase records,
//! normalize each magnitude to per-unit against the bus base voltage, and
//! classify it against the 0.95 - 1.05 band. Everything else in this crate is
//! the vocabulary around it:
//!
//! - [`units`] - newtype wrappers ([`Volts`], [`Kilovolts`], [`PerUnit`],
//!   [`Degrees`]) so magnitudes, bases and normalized values cannot be mixed
//! - [`PhaseReading`] / [`VoltageStatus`] - one classified phase voltage,
//!   doubling as the flat report row for tabular export
//! - [`ScenarioSnapshot`] / [`ScenarioResult`] - all buses at one solved
//!   instant, and a before/after pair for one scenario parameter
//! - [`VprobeError`] - the unified failure taxonomy shared by the engine
//!   adapter, scenario runners and CLI
//!
//! ```
//! use vprobe_core::{analyze, units::Kilovolts, VoltageStatus};
//!
//! let readings = analyze("Bus1", &[7200.0, 0.0, 7100.0, -120.0], Kilovolts(7.2)).unwrap();
//! assert_eq!(readings.len(), 2);
//! assert_eq!(readings[0].status, VoltageStatus::Normal);
//! ```

pub mod analyzer;
pub mod error;
pub mod snapshot;
pub mod units;

pub use analyzer::{analyze, PhaseReading, VoltageStatus, OVERVOLTAGE_PU, UNDERVOLTAGE_PU};
pub use error::{VprobeError, VprobeResult};
pub use snapshot::{ScenarioResult, ScenarioSnapshot};
pub use units::{Degrees, Kilovolts, PerUnit, Volts};
