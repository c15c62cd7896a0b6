use anyhow::Result;
use tracing::info;

use vprobe_engine::{Engine, TcpEngine};

/// Connectivity probe: connect to the bridge and read the bus list.
pub fn handle(engine_addr: &str) -> Result<()> {
    let mut engine = TcpEngine::connect(engine_addr)?;
    let buses = engine.bus_names()?;

    info!("Engine bridge at {} is reachable", engine_addr);
    if buses.is_empty() {
        println!("Engine reachable; no circuit loaded yet.");
    } else {
        println!("Engine reachable; active circuit has {} bus(es).", buses.len());
    }
    Ok(())
}
