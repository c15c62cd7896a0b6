use std::fs::File;
use std::io::{stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use vprobe_cli::cli::{parse_kwh_list, OutputFormat};
use vprobe_cli::report;
use vprobe_engine::{load_model, TcpEngine};
use vprobe_scenarios::{load_sweep_config, run_sweep, SweepConfig, SweepReport};

const DEFAULT_PACE_MS: u64 = 1000;

#[allow(clippy::too_many_arguments)]
pub fn handle(
    model: &str,
    engine_addr: &str,
    config_path: Option<&Path>,
    kwh: Option<&str>,
    pace_ms: Option<u64>,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_sweep_config(path)?,
        None => SweepConfig {
            pace_ms: DEFAULT_PACE_MS,
            ..SweepConfig::default()
        },
    };
    if let Some(raw) = kwh {
        config.kwh_values = parse_kwh_list(raw)?;
    }
    if let Some(pace) = pace_ms {
        config.pace_ms = pace;
    }

    let mut engine = TcpEngine::connect(engine_addr)?;
    load_model(&mut engine, model)?;

    let report = run_sweep(&mut engine, &config)?;
    for failure in &report.failures {
        warn!(
            "Scenario {} kWh excluded from the report: {}",
            failure.kwh, failure.error
        );
    }

    emit(&report, format, out)?;
    info!(
        "Sweep complete: {} scenario(s) reported, {} failed",
        report.success_count(),
        report.failure_count()
    );
    Ok(())
}

fn emit(report: &SweepReport, format: OutputFormat, out: Option<&Path>) -> Result<()> {
    match (format, out) {
        (OutputFormat::Table, Some(path)) => render_tables(report, &mut create(path)?),
        (OutputFormat::Table, None) => render_tables(report, &mut stdout()),
        (OutputFormat::Json, Some(path)) => report::write_json(report, &mut create(path)?),
        (OutputFormat::Json, None) => report::write_json(report, &mut stdout()),
        (OutputFormat::Csv, Some(path)) => report::write_csv(report, create(path)?),
        (OutputFormat::Csv, None) => report::write_csv(report, stdout()),
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating report file {}", path.display()))
}

fn render_tables<W: Write>(report: &SweepReport, out: &mut W) -> Result<()> {
    for result in &report.results {
        writeln!(
            out,
            "\nTransaction of {} kWh (load scaled: {}, final tap: {})",
            result.kwh, result.load_scaled, result.tap_position
        )?;
        report::render_snapshot("Before regulator:", &result.before, &mut *out)?;
        report::render_snapshot("After regulator:", &result.after, &mut *out)?;
    }
    Ok(())
}
