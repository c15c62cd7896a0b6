//! Text command builders for the engine's command surface.
//!
//! The engine accepts free-form text commands; these helpers render the small
//! subset this pipeline issues so the command grammar lives in one place.

/// Specification of a shunt fault to inject into the active circuit.
#[derive(Debug, Clone)]
pub struct FaultSpec {
    /// Device name within the engine, e.g. "f1"
    pub name: String,
    /// Bus the fault is connected to, e.g. "H1bus"
    pub bus: String,
    /// Number of faulted phases
    pub phases: u32,
    /// Fault resistance in ohms
    pub resistance_ohms: f64,
}

impl FaultSpec {
    /// Render as a `New Fault.<name> ...` engine command.
    pub fn to_command(&self) -> String {
        format!(
            "New Fault.{} bus1={} phases={} r={}",
            self.name, self.bus, self.phases, self.resistance_ohms
        )
    }
}

/// `Compile "<path>"` - build a circuit model from a master file.
pub fn compile(path: &str) -> String {
    format!("Compile \"{path}\"")
}

/// `Redirect <path>` - load a circuit model, resolving relative includes.
pub fn redirect(path: &str) -> String {
    format!("Redirect {path}")
}

/// `<device>.Enabled=Yes|No` - toggle a named device such as a RegControl.
pub fn set_enabled(device: &str, enabled: bool) -> String {
    let state = if enabled { "Yes" } else { "No" };
    format!("{device}.Enabled={state}")
}

/// `Solve` - trigger a load-flow solve of the active circuit.
pub fn solve() -> String {
    "Solve".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_device_toggle() {
        assert_eq!(
            set_enabled("RegControl.Reg1", false),
            "RegControl.Reg1.Enabled=No"
        );
        assert_eq!(
            set_enabled("RegControl.Reg1", true),
            "RegControl.Reg1.Enabled=Yes"
        );
    }

    #[test]
    fn renders_fault_injection() {
        let fault = FaultSpec {
            name: "f1".into(),
            bus: "H1bus".into(),
            phases: 1,
            resistance_ohms: 0.0001,
        };
        assert_eq!(fault.to_command(), "New Fault.f1 bus1=H1bus phases=1 r=0.0001");
    }

    #[test]
    fn quotes_compile_path() {
        assert_eq!(
            compile("models/tap_changer_circuit.dss"),
            "Compile \"models/tap_changer_circuit.dss\""
        );
    }
}
