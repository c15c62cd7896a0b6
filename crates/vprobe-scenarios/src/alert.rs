//! Alert dispatch: deliver a fault classification to a webhook endpoint.
//!
//! Delivery is best-effort: success is exactly HTTP 200, anything else is an
//! [`VprobeError::AlertDelivery`] for the caller to log. There is no retry and
//! no rollback of the underlying circuit mutation; a lost alert never aborts
//! the run.

use tracing::info;

use vprobe_core::{VprobeError, VprobeResult};

use crate::fault::FaultAlert;

/// POST the alert as a JSON body to `url`.
pub fn post_alert(url: &str, alert: &FaultAlert) -> VprobeResult<()> {
    let payload = serde_json::to_value(alert)
        .map_err(|e| VprobeError::AlertDelivery(format!("encoding alert payload: {e}")))?;

    match ureq::post(url).send_json(payload) {
        Ok(response) if response.status() == 200 => {
            info!("Alert for '{}' delivered to webhook", alert.affected_entity);
            Ok(())
        }
        Ok(response) => Err(VprobeError::AlertDelivery(format!(
            "webhook returned HTTP {}",
            response.status()
        ))),
        Err(e) => Err(VprobeError::AlertDelivery(format!(
            "posting alert to {url}: {e}"
        ))),
    }
}
