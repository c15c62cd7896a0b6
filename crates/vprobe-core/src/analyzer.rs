//! Per-bus voltage analysis: decode, normalize, classify.
//!
//! The engine reports each bus's voltages as a flat interleaved array of
//! magnitude/angle pairs, one pair per phase. [`analyze`] turns that array
//! into classified [`PhaseReading`]s:
//!
//! 1. **Decode**: element `2k` is the magnitude (V) of phase `k+1`, element
//!    `2k+1` its angle (degrees). Phase numbering is positional; mapping to
//!    physical phases (A/B/C) is the engine's business, not ours.
//! 2. **Normalize**: per-unit = magnitude / (base_kV × 1000), defined only
//!    when the base is positive.
//! 3. **Classify**: against the fixed 0.95 / 1.05 band, boundaries inclusive
//!    as Normal. A missing base forces `BaseUnavailable` regardless of
//!    magnitude.
//!
//! `analyze` is a pure function: no engine access, no hidden state.

use serde::{Deserialize, Serialize};

use crate::error::{VprobeError, VprobeResult};
use crate::units::{Degrees, Kilovolts, PerUnit, Volts};

/// Per-unit value below which a reading is classified as undervoltage.
pub const UNDERVOLTAGE_PU: f64 = 0.95;

/// Per-unit value above which a reading is classified as overvoltage.
pub const OVERVOLTAGE_PU: f64 = 1.05;

/// Classification of one phase reading against the voltage band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoltageStatus {
    /// Per-unit voltage strictly below [`UNDERVOLTAGE_PU`]
    Undervoltage,
    /// Per-unit voltage strictly above [`OVERVOLTAGE_PU`]
    Overvoltage,
    /// Within the band, boundaries included
    Normal,
    /// Bus base voltage was zero or negative, per-unit undefined
    BaseUnavailable,
}

impl VoltageStatus {
    /// True when the reading lies outside the band (alerting-relevant).
    pub fn is_violation(self) -> bool {
        matches!(self, VoltageStatus::Undervoltage | VoltageStatus::Overvoltage)
    }
}

impl std::fmt::Display for VoltageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VoltageStatus::Undervoltage => "Undervoltage",
            VoltageStatus::Overvoltage => "Overvoltage",
            VoltageStatus::Normal => "Normal",
            VoltageStatus::BaseUnavailable => "Base unavailable",
        };
        write!(f, "{label}")
    }
}

/// One classified phase voltage at one bus, at one solved instant.
///
/// Doubles as the flat report row `(bus, phase, magnitude, angle, pu, status)`
/// consumed by tabular rendering and columnar export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReading {
    pub bus: String,
    /// 1-based phase index, derived from position in the telemetry array
    pub phase: usize,
    pub magnitude: Volts,
    pub angle: Degrees,
    /// Defined iff the bus base voltage is positive
    pub per_unit: Option<PerUnit>,
    pub status: VoltageStatus,
}

/// Classify a defined per-unit value against the band.
fn classify(pu: PerUnit) -> VoltageStatus {
    if pu.value() < UNDERVOLTAGE_PU {
        VoltageStatus::Undervoltage
    } else if pu.value() > OVERVOLTAGE_PU {
        VoltageStatus::Overvoltage
    } else {
        VoltageStatus::Normal
    }
}

/// Analyze the voltages of all phases of one bus.
///
/// `mag_angle` must hold magnitude/angle pairs; an odd length is a contract
/// violation in the engine adapter's data and fails with
/// [`VprobeError::MalformedTelemetry`] without producing a partial result.
///
/// Total over well-formed input: zero or negative magnitudes are physically
/// nonsensical but classified like any other value rather than rejected.
pub fn analyze(
    bus: &str,
    mag_angle: &[f64],
    base: Kilovolts,
) -> VprobeResult<Vec<PhaseReading>> {
    if mag_angle.len() % 2 != 0 {
        return Err(VprobeError::MalformedTelemetry(format!(
            "bus '{}' reported {} telemetry values, expected magnitude/angle pairs",
            bus,
            mag_angle.len()
        )));
    }

    let base_volts = base.to_volts();
    let mut readings = Vec::with_capacity(mag_angle.len() / 2);

    for (k, pair) in mag_angle.chunks_exact(2).enumerate() {
        let magnitude = Volts(pair[0]);
        let angle = Degrees(pair[1]);

        let (per_unit, status) = if base_volts.value() > 0.0 {
            let pu = magnitude.per_unit(base_volts);
            (Some(pu), classify(pu))
        } else {
            (None, VoltageStatus::BaseUnavailable)
        };

        readings.push(PhaseReading {
            bus: bus.to_string(),
            phase: k + 1,
            magnitude,
            angle,
            per_unit,
            status,
        });
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pu(reading: &PhaseReading) -> f64 {
        reading.per_unit.expect("per-unit should be defined").value()
    }

    #[test]
    fn decodes_interleaved_pairs_in_order() {
        let readings = analyze("Bus1", &[7200.0, 0.0, 7100.0, -120.0], Kilovolts(7.2)).unwrap();
        assert_eq!(readings.len(), 2);

        assert_eq!(readings[0].phase, 1);
        assert_eq!(readings[0].magnitude, Volts(7200.0));
        assert_eq!(readings[0].angle, Degrees(0.0));
        assert!((pu(&readings[0]) - 1.0).abs() < 1e-12);
        assert_eq!(readings[0].status, VoltageStatus::Normal);

        assert_eq!(readings[1].phase, 2);
        assert_eq!(readings[1].angle, Degrees(-120.0));
        assert!((pu(&readings[1]) - 0.9861).abs() < 1e-4);
        assert_eq!(readings[1].status, VoltageStatus::Normal);
    }

    #[test]
    fn classifies_undervoltage() {
        let readings = analyze("Bus1", &[6800.0, 0.0], Kilovolts(7.2)).unwrap();
        assert!((pu(&readings[0]) - 0.9444).abs() < 1e-4);
        assert_eq!(readings[0].status, VoltageStatus::Undervoltage);
    }

    #[test]
    fn classifies_overvoltage() {
        let readings = analyze("Bus1", &[7600.0, 0.0], Kilovolts(7.2)).unwrap();
        assert!((pu(&readings[0]) - 1.0556).abs() < 1e-4);
        assert_eq!(readings[0].status, VoltageStatus::Overvoltage);
    }

    #[test]
    fn band_boundaries_are_normal() {
        let base = Kilovolts(7.2);
        let low = analyze("Bus1", &[0.95 * 7200.0, 0.0], base).unwrap();
        assert_eq!(low[0].status, VoltageStatus::Normal);

        let high = analyze("Bus1", &[1.05 * 7200.0, 0.0], base).unwrap();
        assert_eq!(high[0].status, VoltageStatus::Normal);
    }

    #[test]
    fn nonpositive_base_forces_base_unavailable() {
        for base_kv in [0.0, -7.2] {
            let readings =
                analyze("Bus1", &[7200.0, 0.0, 9999.0, 45.0], Kilovolts(base_kv)).unwrap();
            for reading in &readings {
                assert_eq!(reading.status, VoltageStatus::BaseUnavailable);
                assert!(reading.per_unit.is_none());
            }
        }
    }

    #[test]
    fn odd_length_telemetry_is_rejected() {
        let err = analyze("Bus1", &[7200.0, 0.0, 7100.0], Kilovolts(7.2)).unwrap_err();
        assert!(matches!(err, VprobeError::MalformedTelemetry(_)));
    }

    #[test]
    fn empty_telemetry_yields_no_readings() {
        let readings = analyze("Bus1", &[], Kilovolts(7.2)).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn negative_magnitude_is_classified_not_rejected() {
        let readings = analyze("Bus1", &[-7200.0, 0.0], Kilovolts(7.2)).unwrap();
        assert_eq!(readings[0].status, VoltageStatus::Undervoltage);
    }

    #[test]
    fn analyze_is_deterministic() {
        let input = [7200.0, 0.0, 6800.0, -120.0, 7600.0, 120.0];
        let first = analyze("Bus1", &input, Kilovolts(7.2)).unwrap();
        let second = analyze("Bus1", &input, Kilovolts(7.2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn phase_count_matches_pair_count() {
        let input: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let readings = analyze("BusN", &input, Kilovolts(7.2)).unwrap();
        assert_eq!(readings.len(), 6);
        let phases: Vec<usize> = readings.iter().map(|r| r.phase).collect();
        assert_eq!(phases, vec![1, 2, 3, 4, 5, 6]);
    }
}
