//! Line-oriented TCP client for a live engine bridge.
//!
//! The engine itself is an out-of-process automation server; a small bridge
//! exposes it over a socket with a one-request-one-reply line protocol:
//!
//! ```text
//! -> cmd RegControl.Reg1.Enabled=No
//! <- ok
//! -> buses
//! <- ok sourcebus,h1bus,h2bus
//! -> voltages h1bus
//! <- ok 7200 0 7100 -120
//! -> basekv h1bus
//! <- ok 7.2
//! -> scaleload house1 3.5
//! <- ok
//! -> tap Reg1
//! <- ok 5
//! ```
//!
//! Any reply line starting with `err` carries the engine's diagnostic and maps
//! to [`VprobeError::Engine`]. The session (and the engine's active-bus
//! selection state behind it) belongs to this handle alone; dropping the
//! handle closes the socket on every exit path.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use tracing::debug;
use vprobe_core::{Kilovolts, VprobeError, VprobeResult};

use crate::Engine;

/// Blocking line-protocol client for an engine bridge.
#[derive(Debug)]
pub struct TcpEngine {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: String,
}

impl TcpEngine {
    /// Connect to a bridge at `addr` (host:port).
    ///
    /// Connection failure means the engine cannot be reached at all and maps
    /// to the fatal [`VprobeError::EngineUnavailable`].
    pub fn connect(addr: &str) -> VprobeResult<Self> {
        let stream = TcpStream::connect(addr).map_err(|e| {
            VprobeError::EngineUnavailable(format!("connecting to engine bridge at {addr}: {e}"))
        })?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            reader,
            writer: stream,
            peer: addr.to_string(),
        })
    }

    /// Send one request line and read one reply line.
    fn request(&mut self, line: &str) -> VprobeResult<String> {
        debug!("-> {}", line);
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;

        let mut reply = String::new();
        let n = self.reader.read_line(&mut reply)?;
        if n == 0 {
            return Err(VprobeError::Engine(format!(
                "engine bridge at {} closed the connection",
                self.peer
            )));
        }
        let reply = reply.trim_end();
        debug!("<- {}", reply);

        if let Some(payload) = reply.strip_prefix("ok") {
            Ok(payload.trim_start().to_string())
        } else if let Some(message) = reply.strip_prefix("err") {
            Err(VprobeError::Engine(message.trim_start().to_string()))
        } else {
            Err(VprobeError::Engine(format!(
                "unexpected reply from engine bridge: '{reply}'"
            )))
        }
    }
}

fn parse_f64(token: &str, what: &str) -> VprobeResult<f64> {
    token.parse::<f64>().map_err(|_| {
        VprobeError::MalformedTelemetry(format!("{what}: '{token}' is not a number"))
    })
}

impl Engine for TcpEngine {
    fn command(&mut self, cmd: &str) -> VprobeResult<()> {
        self.request(&format!("cmd {cmd}"))?;
        Ok(())
    }

    fn bus_names(&mut self) -> VprobeResult<Vec<String>> {
        let payload = self.request("buses")?;
        Ok(payload
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn bus_voltages(&mut self, bus: &str) -> VprobeResult<Vec<f64>> {
        let payload = self.request(&format!("voltages {bus}"))?;
        payload
            .split_whitespace()
            .map(|token| parse_f64(token, &format!("voltage telemetry for bus '{bus}'")))
            .collect()
    }

    fn bus_base_kv(&mut self, bus: &str) -> VprobeResult<Kilovolts> {
        let payload = self.request(&format!("basekv {bus}"))?;
        Ok(Kilovolts(parse_f64(
            &payload,
            &format!("base voltage for bus '{bus}'"),
        )?))
    }

    fn scale_load(&mut self, load: &str, factor: f64) -> VprobeResult<()> {
        self.request(&format!("scaleload {load} {factor}"))?;
        Ok(())
    }

    fn regulator_tap(&mut self, regulator: &str) -> VprobeResult<i32> {
        let payload = self.request(&format!("tap {regulator}"))?;
        payload.parse::<i32>().map_err(|_| {
            VprobeError::MalformedTelemetry(format!(
                "tap position for '{regulator}': '{payload}' is not an integer"
            ))
        })
    }
}
