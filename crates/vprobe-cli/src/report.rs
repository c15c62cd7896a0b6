//! Report rendering: aligned terminal tables plus CSV/JSON export of the
//! flat `(bus, phase, magnitude, angle, pu, status)` rows.

use std::io::{self, Write};

use serde::Serialize;
use tabwriter::TabWriter;

use vprobe_core::{PhaseReading, ScenarioSnapshot};
use vprobe_scenarios::SweepReport;

/// One exported row, keyed by scenario parameter and snapshot stage.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub kwh: f64,
    pub stage: &'static str,
    pub bus: &'a str,
    pub phase: usize,
    pub magnitude_v: f64,
    pub angle_deg: f64,
    /// Empty when the bus base voltage was unavailable
    pub per_unit: Option<f64>,
    pub status: String,
}

fn export_row<'a>(kwh: f64, stage: &'static str, reading: &'a PhaseReading) -> ExportRow<'a> {
    ExportRow {
        kwh,
        stage,
        bus: &reading.bus,
        phase: reading.phase,
        magnitude_v: reading.magnitude.value(),
        angle_deg: reading.angle.value(),
        per_unit: reading.per_unit.map(|pu| pu.value()),
        status: reading.status.to_string(),
    }
}

/// Flatten a sweep report into export rows, sweep order preserved.
pub fn export_rows(report: &SweepReport) -> Vec<ExportRow<'_>> {
    let mut rows = Vec::new();
    for result in &report.results {
        for reading in &result.before.readings {
            rows.push(export_row(result.kwh, "before", reading));
        }
        for reading in &result.after.readings {
            rows.push(export_row(result.kwh, "after", reading));
        }
    }
    rows
}

/// Render one snapshot as an aligned table.
pub fn render_snapshot<W: Write>(title: &str, snapshot: &ScenarioSnapshot, out: W) -> io::Result<()> {
    let mut tw = TabWriter::new(out);
    writeln!(tw, "{title}")?;
    writeln!(tw, "Bus\tPhase\tV_mag(V)\tAngle(deg)\tV_pu\tStatus")?;
    for reading in &snapshot.readings {
        let pu = reading
            .per_unit
            .map(|pu| format!("{:.4}", pu.value()))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            tw,
            "{}\t{}\t{:.1}\t{:.2}\t{}\t{}",
            reading.bus,
            reading.phase,
            reading.magnitude.value(),
            reading.angle.value(),
            pu,
            reading.status
        )?;
    }
    tw.flush()
}

/// Write the flattened sweep rows as CSV.
pub fn write_csv<W: Write>(report: &SweepReport, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in export_rows(report) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full sweep report (snapshots, failures, taps) as pretty JSON.
pub fn write_json<W: Write>(report: &SweepReport, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
