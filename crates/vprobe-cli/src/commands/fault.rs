use std::io::{self, stdout, Write};

use anyhow::Result;
use tracing::{error, info};

use vprobe_cli::report::render_snapshot;
use vprobe_engine::{load_model, TcpEngine};
use vprobe_scenarios::{post_alert, run_fault, FaultDecision, FaultOutcome, FaultScenario};

#[allow(clippy::too_many_arguments)]
pub fn handle(
    model: &str,
    engine_addr: &str,
    apply: bool,
    decline: bool,
    webhook: Option<&str>,
    bus: &str,
    entity: &str,
    backups: Option<&str>,
) -> Result<()> {
    let scenario = FaultScenario {
        bus: bus.to_string(),
        affected_entity: entity.to_string(),
        backup_candidates: backups
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        ..FaultScenario::default()
    };

    let decision = if apply {
        FaultDecision::Apply
    } else if decline {
        FaultDecision::Decline
    } else {
        prompt_decision(entity)?
    };

    let mut engine = TcpEngine::connect(engine_addr)?;
    load_model(&mut engine, model)?;

    match run_fault(&mut engine, &scenario, decision)? {
        FaultOutcome::NoFault => {
            println!("No fault applied. System running normally.");
        }
        FaultOutcome::Fault { alert, snapshot } => {
            println!("{}", alert.human_message);
            render_snapshot("Post-fault voltage profile:", &snapshot, stdout())?;

            if let Some(url) = webhook {
                // Delivery failure is reported but never aborts the run; the
                // circuit mutation already happened and is not rolled back.
                match post_alert(url, &alert) {
                    Ok(()) => info!("Alert sent to webhook successfully"),
                    Err(e) => error!("{}", e),
                }
            }
        }
    }
    Ok(())
}

/// Interactive yes/no gate for fault injection. Anything but yes declines.
fn prompt_decision(entity: &str) -> Result<FaultDecision> {
    print!("Do you want to apply fault at {entity}? (yes/no): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => FaultDecision::Apply,
        _ => FaultDecision::Decline,
    })
}
