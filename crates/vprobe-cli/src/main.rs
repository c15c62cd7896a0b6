use clap::Parser;
use std::process;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use vprobe_cli::cli::{Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Commands::Sweep {
            model,
            engine,
            config,
            kwh,
            pace_ms,
            format,
            out,
        } => commands::sweep::handle(
            model,
            engine,
            config.as_deref(),
            kwh.as_deref(),
            *pace_ms,
            *format,
            out.as_deref(),
        ),
        Commands::Fault {
            model,
            engine,
            apply,
            decline,
            webhook,
            bus,
            entity,
            backups,
        } => commands::fault::handle(
            model,
            engine,
            *apply,
            *decline,
            webhook.as_deref(),
            bus,
            entity,
            backups.as_deref(),
        ),
        Commands::Doctor { engine } => commands::doctor::handle(engine),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}
