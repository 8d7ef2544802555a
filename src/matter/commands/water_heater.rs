//! WaterHeaterManagement commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::{BridgeError, Result};
use crate::matter::clusters::WaterHeaterManagementState;
use crate::matter::clusters::water_heater::{BoostInfo, BoostState};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "boost"),
    CommandSpec::new(0x01, "cancelBoost"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostRequest {
    pub boost_info: BoostInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WaterHeaterManagementCommand {
    Boost(BoostRequest),
    CancelBoost,
}

impl WaterHeaterManagementCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Boost(_) => "boost",
            Self::CancelBoost => "cancelBoost",
        }
    }
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: WaterHeaterManagementCommand,
) -> Result<CommandResponse> {
    let target = match cmd {
        WaterHeaterManagementCommand::Boost(req) => {
            if req.boost_info.duration == 0 {
                return Err(BridgeError::InvalidValue {
                    attribute: "boostInfo.duration".to_string(),
                    reason: "must be at least one second".to_string(),
                });
            }
            BoostState::Active
        }
        WaterHeaterManagementCommand::CancelBoost => BoostState::Inactive,
    };
    inv.forward_then(|s: &mut WaterHeaterManagementState| s.boost_state = target as u8)
        .await
}
