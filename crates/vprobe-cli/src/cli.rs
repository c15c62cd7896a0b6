use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vprobe", author, version, about = "Scenario-based voltage analysis against an external circuit engine", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep transaction scenarios and report before/after voltage profiles
    Sweep {
        /// Circuit model file loaded into the engine
        #[arg(long)]
        model: String,
        /// Engine bridge address (host:port)
        #[arg(long)]
        engine: String,
        /// YAML sweep configuration; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated transaction sizes in kWh
        #[arg(long)]
        kwh: Option<String>,
        /// Pacing delay between scenarios in milliseconds (default 1000
        /// unless a config file sets it)
        #[arg(long)]
        pace_ms: Option<u64>,
        /// Output format for the exported report
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Conditionally inject a fault and dispatch a webhook alert
    Fault {
        /// Circuit model file loaded into the engine
        #[arg(long)]
        model: String,
        /// Engine bridge address (host:port)
        #[arg(long)]
        engine: String,
        /// Inject the fault without prompting
        #[arg(long, conflicts_with = "decline")]
        apply: bool,
        /// Skip the fault without prompting
        #[arg(long)]
        decline: bool,
        /// Webhook URL for the alert payload
        #[arg(long)]
        webhook: Option<String>,
        /// Bus the fault is connected to
        #[arg(long, default_value = "H1bus")]
        bus: String,
        /// Entity named in the alert
        #[arg(long, default_value = "House1")]
        entity: String,
        /// Comma-separated backup-supply candidates
        #[arg(long)]
        backups: Option<String>,
    },
    /// Check that the engine bridge is reachable
    Doctor {
        /// Engine bridge address (host:port)
        #[arg(long)]
        engine: String,
    },
}

/// Output format for the sweep report.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON report (pipe-friendly, structured)
    Json,
    /// Comma-separated rows (pipe to awk/cut/etc)
    Csv,
}

/// Parse a comma-separated list of kWh values.
pub fn parse_kwh_list(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| anyhow::anyhow!("invalid kWh value '{s}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_kwh_list() {
        assert_eq!(parse_kwh_list("1, 3,11").unwrap(), vec![1.0, 3.0, 11.0]);
        assert!(parse_kwh_list("1,x").is_err());
    }

    #[test]
    fn apply_and_decline_conflict() {
        let result = Cli::try_parse_from([
            "vprobe", "fault", "--model", "m.dss", "--engine", "localhost:7777", "--apply",
            "--decline",
        ]);
        assert!(result.is_err());
    }
}
