//! Unified error types for the vprobe ecosystem
//!
//! This module provides a common error type [`VprobeError`] that can represent
//! errors from any part of the system. The variants follow the failure
//! taxonomy of the scenario pipeline: fatal setup errors (engine unreachable,
//! model failed to load), telemetry contract violations, per-scenario
//! failures, and non-fatal alert-delivery failures.
//!
//! # Example
//!
//! ```ignore
//! use vprobe_core::{VprobeError, VprobeResult};
//!
//! fn capture(bus: &str) -> VprobeResult<()> {
//!     let telemetry = read_bus(bus)?;
//!     analyze_bus(bus, &telemetry)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all vprobe operations.
///
/// Fatality is a property of where the error surfaces, not of the variant
/// itself: [`VprobeError::EngineUnavailable`] and [`VprobeError::ModelLoad`]
/// abort a run before any scenario executes, [`VprobeError::Scenario`] is
/// caught at the sweep level and skips one scenario, and
/// [`VprobeError::AlertDelivery`] is reported and ignored.
#[derive(Error, Debug)]
pub enum VprobeError {
    /// I/O errors (file access, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external circuit engine cannot be reached or started
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The circuit model failed to load (e.g. zero buses reported)
    #[error("Model load failure: {0}")]
    ModelLoad(String),

    /// Decode-time contract violation in bus telemetry
    #[error("Malformed telemetry: {0}")]
    MalformedTelemetry(String),

    /// An engine command or telemetry read was rejected by the engine
    #[error("Engine error: {0}")]
    Engine(String),

    /// A scenario step failed; the scenario is abandoned without a result
    #[error("Scenario failure: {0}")]
    Scenario(String),

    /// Alert notification transport failure or non-200 response
    #[error("Alert delivery failure: {0}")]
    AlertDelivery(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using VprobeError.
pub type VprobeResult<T> = Result<T, VprobeError>;

impl VprobeError {
    /// True for errors that abort the whole run rather than one scenario.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VprobeError::EngineUnavailable(_) | VprobeError::ModelLoad(_)
        )
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for VprobeError {
    fn from(err: anyhow::Error) -> Self {
        VprobeError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for VprobeError {
    fn from(s: String) -> Self {
        VprobeError::Other(s)
    }
}

impl From<&str> for VprobeError {
    fn from(s: &str) -> Self {
        VprobeError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VprobeError::Engine("solve did not converge".into());
        assert!(err.to_string().contains("Engine error"));
        assert!(err.to_string().contains("solve did not converge"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VprobeError = io_err.into();
        assert!(matches!(err, VprobeError::Io(_)));
    }

    #[test]
    fn test_fatality_partition() {
        assert!(VprobeError::EngineUnavailable("refused".into()).is_fatal());
        assert!(VprobeError::ModelLoad("zero buses".into()).is_fatal());
        assert!(!VprobeError::Scenario("step failed".into()).is_fatal());
        assert!(!VprobeError::AlertDelivery("503".into()).is_fatal());
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> VprobeResult<()> {
            Err(VprobeError::MalformedTelemetry("odd length".into()))
        }

        fn outer() -> VprobeResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(
            outer(),
            Err(VprobeError::MalformedTelemetry(_))
        ));
    }
}
