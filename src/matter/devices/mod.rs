//! Composite devices: preconfigured endpoints assembled from several
//! cluster behaviors whose initial states have to agree with each other.
//!
//! Builders attach the device-specific behaviors, let the
//! [`ClusterResolver`](super::resolver::ClusterResolver) fill in the rest of
//! the required clusters, and reject inconsistent configurations with
//! [`BridgeError::Config`].

pub mod robot_vacuum;
pub mod water_heater;

use crate::error::{BridgeError, Result};
use crate::matter::clusters::ClusterKind;
use crate::matter::clusters::modes::ModeBase;

/// `currentMode` must name one of the supported modes.
pub(crate) fn check_mode<S: ModeBase>(kind: ClusterKind, state: &S) -> Result<()> {
    if state.supports_mode(state.current_mode()) {
        Ok(())
    } else {
        Err(BridgeError::Config(format!(
            "{}: current mode {} is not a supported mode",
            kind,
            state.current_mode()
        )))
    }
}

/// `value` must lie inside `min..=max`.
pub(crate) fn check_range<T: PartialOrd + std::fmt::Display>(
    what: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if min > max {
        return Err(BridgeError::Config(format!(
            "{}: limits {}..{} are inverted",
            what, min, max
        )));
    }
    if value < min || value > max {
        return Err(BridgeError::Config(format!(
            "{} {} is outside {}..{}",
            what, value, min, max
        )));
    }
    Ok(())
}
